//! Colored terminal output helpers.
//!
//! All user-facing status goes through these functions so every command
//! is styled the same way.  Status lines go to stderr; stdout is kept for
//! payload bytes so `lockbox cat` can be piped.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::ContainerInfo;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    eprintln!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    eprintln!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of container header fields.
pub fn print_info_table(info: &ContainerInfo) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Version".to_string(), info.version.to_string()]);
    table.add_row(vec!["Salt".to_string(), BASE64.encode(&info.salt)]);
    table.add_row(vec!["Nonce".to_string(), BASE64.encode(&info.nonce)]);
    table.add_row(vec![
        "Ciphertext".to_string(),
        format!("{} bytes", info.ciphertext_len),
    ]);
    table.add_row(vec![
        "Payload".to_string(),
        format!("{} bytes", info.payload_len),
    ]);

    println!("{table}");
}
