//! Royalty DCF upload server binary
//!
//! Browser front-end for the valuation pipeline: upload an earnings export,
//! download the generated valuation workbook.

use clap::Parser;
use royalty_dcf::server::{run_server, ServerConfig};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Parser, Debug)]
#[command(name = "valuate-server")]
#[command(version)]
#[command(about = "Royalty DCF upload server - CSV/XLSX in, valuation workbook out")]
#[command(long_about = r#"
Royalty DCF upload server

Serves a single-page upload form and turns earnings exports into DCF
valuation workbooks:
  - GET  /         - Upload form
  - POST /process  - Multipart upload ('file' field), responds with the .xlsx
  - GET  /health   - Health check

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - Tracing and structured logging

Example usage:
  valuate-server                        # Listen on 0.0.0.0:5000
  valuate-server --host 127.0.0.1 --port 8000

  curl -F file=@listing-482.csv http://localhost:5000/process -OJ
"#)]
struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        index_html: INDEX_HTML,
    };

    run_server(config).await
}
