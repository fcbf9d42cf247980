//! echo-probe: POST a payload to a running telemetry-echo server and print the echo.
//!
//! Exits non-zero when the server answers with anything but a 2xx.

use clap::Parser;
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "echo-probe")]
#[command(about = "POST a JSON payload to a telemetry-echo server", long_about = None)]
struct Cli {
    /// Server URL to POST to.
    #[arg(short, long, default_value = "http://localhost:8095")]
    url: String,

    /// Payload to send.
    #[arg(short, long, default_value = "{}")]
    data: String,

    /// Send the payload as-is, even if it is not valid JSON.
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !cli.raw {
        serde_json::from_str::<Value>(&cli.data)
            .map_err(|e| format!("payload is not valid JSON ({}); pass --raw to send it anyway", e))?;
    }

    let client = reqwest::Client::new();
    let res = client
        .post(&cli.url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(cli.data.clone())
        .send()
        .await?;

    println!("Sent {} bytes", cli.data.len());
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    println!("{}", render_response(status, &text)?);
    Ok(())
}

/// Pretty-print a successful echo; any non-2xx becomes an error.
fn render_response(status: StatusCode, text: &str) -> Result<String, Box<dyn std::error::Error>> {
    if !status.is_success() {
        eprintln!("Response: {}", text);
        return Err(format!("server returned status {}", status).into());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(json) => Ok(serde_json::to_string_pretty(&json)?),
        Err(_) => Ok(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_pretty_printed() {
        let out = render_response(StatusCode::OK, r#"{"Content-Length":"2"}"#).unwrap();
        assert_eq!(out, "{\n  \"Content-Length\": \"2\"\n}");
    }

    #[test]
    fn test_non_json_success_is_passed_through() {
        assert_eq!(render_response(StatusCode::OK, "ok").unwrap(), "ok");
    }

    #[test]
    fn test_error_status_is_an_error() {
        let err = render_response(StatusCode::BAD_REQUEST, r#"{"error":"malformed JSON body"}"#).unwrap_err();
        assert_eq!(err.to_string(), "server returned status 400 Bad Request");
    }
}
