//! Command handlers.

use std::fs;
use std::io::Read;
use std::path::Path;

use console::style;
use hallar::Document;
use hallar_codegen::{emit_class, render_report, to_json, Language};

use crate::cli::{GenerateArgs, Mode};
use crate::error::{CliError, CliResult};

/// Fallback class name when no input file name is available.
const DEFAULT_CLASS_NAME: &str = "GeneratedPage";

/// Run the generate command.
pub fn run_generate(args: &GenerateArgs) -> CliResult<()> {
    let html = read_input(args)?;
    let lang = Language::from_name(&args.lang);
    let class_name = args
        .name
        .clone()
        .unwrap_or_else(|| derive_class_name(args.input.as_deref()));

    let doc = Document::parse(&html)?;
    let entries = doc.collect()?;
    tracing::info!(count = entries.len(), ?lang, "analyzed page");

    match args.mode {
        Mode::Json => {
            println!("{}", to_json(&entries, lang)?);
        }
        Mode::Locators => {
            print!("{}", render_report(&entries, lang));
        }
        Mode::Code => {
            let code = emit_class(lang, &class_name, &entries)?;
            match &args.out {
                Some(dir) => {
                    fs::create_dir_all(dir)?;
                    let path = dir.join(format!("{class_name}.{}", lang.extension()));
                    fs::write(&path, code)?;
                    eprintln!("{} {}", style("wrote").green().bold(), path.display());
                }
                None => println!("{code}"),
            }
        }
    }
    Ok(())
}

fn read_input(args: &GenerateArgs) -> CliResult<String> {
    if args.stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    let path = args
        .input
        .as_ref()
        .ok_or_else(|| CliError::invalid_argument("provide --input <file> or --stdin"))?;
    Ok(fs::read_to_string(path)?)
}

/// Derive a class name from the input file stem: `login_form.html`
/// becomes `LoginFormPage`.
fn derive_class_name(input: Option<&Path>) -> String {
    let Some(stem) = input.and_then(Path::file_stem).and_then(|s| s.to_str()) else {
        return DEFAULT_CLASS_NAME.to_string();
    };
    let mut out = String::new();
    let mut upper_next = true;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            if upper_next {
                out.push(c.to_ascii_uppercase());
                upper_next = false;
            } else {
                out.push(c);
            }
        } else {
            upper_next = true;
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        return DEFAULT_CLASS_NAME.to_string();
    }
    format!("{out}Page")
}
