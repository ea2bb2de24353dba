use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zenpdf-cli")]
#[command(about = "Client CLI for the zenpdf compression service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Compress a PDF file
    Compress {
        /// Input PDF
        file: PathBuf,

        /// Quality preset: high, medium or low
        #[arg(short, long, default_value = "high")]
        quality: String,

        /// Target output size in megabytes
        #[arg(short, long)]
        target_size_mb: Option<f64>,

        /// Output path (default: compressed_<input name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            println!("{} {}", res.status(), res.text().await?);
        }
        Commands::Compress {
            file,
            quality,
            target_size_mb,
            output,
        } => {
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.pdf".to_string());
            let data = tokio::fs::read(&file).await?;

            let part = reqwest::multipart::Part::bytes(data).file_name(filename.clone());
            let mut form = reqwest::multipart::Form::new()
                .part("file", part)
                .text("quality", quality);
            if let Some(target) = target_size_mb {
                form = form.text("targetSizeMB", target.to_string());
            }

            let res = client
                .post(format!("{}/compress", cli.url))
                .multipart(form)
                .send()
                .await?;

            if !res.status().is_success() {
                eprintln!("Error: server returned {}", res.status());
                eprintln!("{}", res.text().await?);
                std::process::exit(1);
            }

            for header in [
                "x-original-size",
                "x-compressed-size",
                "x-compression-ratio",
                "x-quality-used",
                "x-target-size",
            ] {
                if let Some(value) = res.headers().get(header) {
                    println!("{header}: {}", value.to_str().unwrap_or("?"));
                }
            }

            let output = output.unwrap_or_else(|| PathBuf::from(format!("compressed_{filename}")));
            let body = res.bytes().await?;
            tokio::fs::write(&output, &body).await?;
            println!("Wrote {} bytes to {}", body.len(), output.display());
        }
    }

    Ok(())
}
