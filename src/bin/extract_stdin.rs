//! Simple CLI that reads HTML from stdin and prints the extraction
//! result as JSON on stdout.
//!
//! Usage: extract_stdin [-u URL]
//!
//! The optional URL seeds relative-link resolution; without it links
//! stay as written.

use std::env;
use std::io::{self, Read};

use legible::ExtractionOptions;

fn main() {
    let mut document_uri = String::from("about:blank");
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-u" | "--url" => {
                let Some(value) = args.next() else {
                    eprintln!("{arg} needs a value");
                    std::process::exit(2);
                };
                document_uri = value;
            }
            "-h" | "--help" => {
                eprintln!("usage: extract_stdin [-u URL] < page.html");
                return;
            }
            other => {
                // Bare argument doubles as the URL.
                document_uri = other.to_string();
            }
        }
    }

    // Bytes, not a string: the payload names its own charset.
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let options = ExtractionOptions::default();
    match legible::extract_bytes_with_options(&html, &document_uri, &options) {
        Ok(result) => {
            println!("{}", serde_json::to_string(&result).unwrap_or_default());
        }
        Err(err) => {
            eprintln!("extraction failed: {err}");
            std::process::exit(1);
        }
    }
}
