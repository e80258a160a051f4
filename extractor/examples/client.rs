use reqwest::multipart::{Form, Part};
use reqwest::Client;

// Usage: cargo run --example client -- <file.pdf> <from_page> <to_page> [ollama|openai]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("missing PDF path")?;
    let from_page = args.next().unwrap_or_else(|| "1".to_string());
    let to_page = args.next().unwrap_or_else(|| from_page.clone());
    let api_choice = args.next().unwrap_or_else(|| "ollama".to_string());

    let base_url = std::env::var("EXTRACT_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    let client = Client::new();

    println!("🔍 Testing extraction client against {}", base_url);

    println!("\n📋 Health Check:");
    let health_response = client.get(format!("{}/health", base_url)).send().await?;
    println!("Status: {}", health_response.status());

    println!("\n📄 Extract pages {}..={} via {}:", from_page, to_page, api_choice);
    let bytes = tokio::fs::read(&path).await?;
    let filename = std::path::Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.pdf".to_string());

    let form = Form::new()
        .part("file", Part::bytes(bytes).file_name(filename).mime_str("application/pdf")?)
        .text("from_page", from_page)
        .text("to_page", to_page)
        .text("api_choice", api_choice);

    let response = client
        .post(format!("{}/extract", base_url))
        .multipart(form)
        .send()
        .await?;

    println!("Status: {}", response.status());
    println!("{}", response.text().await?);

    println!("\n✅ Client test completed!");
    Ok(())
}
