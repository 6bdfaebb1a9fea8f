//! VeriFAQ — verbatim FAQ generation server and command-line tool.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use verifaq_core::VerifaqConfig;
use verifaq_extract::{locate_reference, render_text, FaqExport, FaqGenerator};

mod error;
mod routes;
mod state;

use state::AppState;

fn print_usage() {
    println!("VeriFAQ — verbatim FAQ generation");
    println!();
    println!("Usage: verifaq [command]");
    println!();
    println!("Commands:");
    println!("  (none) | serve               Start the HTTP server");
    println!("  generate <file>              Print FAQs for a document");
    println!("  export <file>                Print a JSON export for a document");
    println!("  locate <file> <reference>    Print the character offset of a reference");
    println!("  help                         Show this help message");
    println!();
    println!("Supported files: .txt .md .pdf .docx .json");
}

/// Run a one-shot CLI command. Returns the process exit code.
fn run_command(config: &VerifaqConfig, command: &str, args: &[String]) -> verifaq_core::Result<i32> {
    let generator = FaqGenerator::new(config.faq.clone());

    match (command, args) {
        ("generate", [file]) => {
            let text = verifaq_ingest::load_path(Path::new(file))?;
            let generation = generator.generate(&text)?;
            println!("{}", render_text(&generation.faqs));
            for warning in &generation.warnings {
                eprintln!("warning: {}", warning);
            }
            Ok(0)
        }
        ("export", [file]) => {
            let text = verifaq_ingest::load_path(Path::new(file))?;
            let generation = generator.generate(&text)?;
            let export = FaqExport::new(&generation.faqs, &text, chrono::Utc::now());
            println!("{}", export.to_json()?);
            Ok(0)
        }
        ("locate", [file, reference]) => {
            let text = verifaq_ingest::load_path(Path::new(file))?;
            match locate_reference(&text, reference) {
                Some(offset) => {
                    println!("{}", offset);
                    Ok(0)
                }
                None => {
                    eprintln!("Reference not found in {}", file);
                    Ok(1)
                }
            }
        }
        _ => {
            let extra = if command == "locate" { " <reference>" } else { "" };
            eprintln!("Usage: verifaq {} <file>{}", command, extra);
            Ok(1)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = VerifaqConfig::from_env()?;
    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "serve" => {}
            "--help" | "-h" | "help" => {
                print_usage();
                return Ok(());
            }
            command @ ("generate" | "export" | "locate") => {
                let code = match run_command(&config, command, &args[2..]) {
                    Ok(code) => code,
                    Err(e) => {
                        eprintln!("{}", e.user_message());
                        1
                    }
                };
                std::process::exit(code);
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'verifaq help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let port = config.server.port;
    let state = Arc::new(AppState::new(config));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("VeriFAQ server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Encryption is essential for every stored customer record. \
        Access logs are retained for ninety days by default. \
        The vault requires two approvals for each secret release. \
        Backups run nightly and are copied to a second region. \
        Operators must rotate signing keys every quarter.";

    fn write_doc(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_generate_and_export_commands() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(&dir, "policy.txt", DOC);
        let config = VerifaqConfig::default();

        assert_eq!(run_command(&config, "generate", &[file.clone()]).unwrap(), 0);
        assert_eq!(run_command(&config, "export", &[file]).unwrap(), 0);
    }

    #[test]
    fn test_locate_command() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(&dir, "policy.md", DOC);
        let config = VerifaqConfig::default();

        let found = vec![file.clone(), "Backups run nightly".to_string()];
        assert_eq!(run_command(&config, "locate", &found).unwrap(), 0);

        let missing = vec![file, "nowhere to be seen".to_string()];
        assert_eq!(run_command(&config, "locate", &missing).unwrap(), 1);
    }

    #[test]
    fn test_command_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = VerifaqConfig::default();

        let unsupported = write_doc(&dir, "policy.xyz", DOC);
        assert!(matches!(
            run_command(&config, "generate", &[unsupported]),
            Err(verifaq_core::Error::UnsupportedFormat(_))
        ));

        let short = write_doc(&dir, "short.txt", "A single sentence is not enough.");
        assert!(matches!(
            run_command(&config, "generate", &[short]),
            Err(verifaq_core::Error::InsufficientContent { .. })
        ));

        assert_eq!(run_command(&config, "generate", &[]).unwrap(), 1);
    }
}
