pub const UPLOAD_FORM: &str = r#"<!doctype html>
<title>Upload PDF</title>
<h1>Upload PDF file</h1>
<form method="post" action="/extract" enctype="multipart/form-data">
  <input type="file" name="file"><br><br>
  <label for="from_page">From page:</label>
  <input type="number" name="from_page" min="1" required><br><br>
  <label for="to_page">To page:</label>
  <input type="number" name="to_page" min="1" required><br><br>

  <label for="api_choice">Choose API:</label>
  <select name="api_choice" required>
    <option value="ollama">Ollama</option>
    <option value="openai">OpenAI</option>
  </select><br><br>
  <input type="submit" value="Upload">
</form>
"#;
