//! HTML templates for the rows page
//!
//! Inline HTML rendered as Rust string constants. Styling uses Tailwind CSS
//! from its CDN; no build tools are required.

/// Base HTML layout wrapping page content.
///
/// Placeholders:
/// - `{title}` - Page title
/// - `{content}` - Inner HTML body content
pub(crate) const BASE_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body>
  {content}
</body>
</html>"#;

/// Results table.
///
/// Placeholders:
/// - `{header_cells}` - one `HEADER_CELL` per column
/// - `{body_rows}` - one `BODY_ROW` per fetched row
pub(crate) const ROWS_TABLE: &str = r#"<div class="flex items-center justify-center min-h-screen bg-gray-100 p-4">
  <div class="w-full max-w-5xl overflow-x-auto bg-white shadow-lg rounded-2xl p-6">
    <table class="w-full border-collapse border border-gray-300">
      <thead>
        <tr class="bg-gray-200 text-gray-700">
          <th class="border border-gray-300 px-4 py-2">Row</th>
          {header_cells}
        </tr>
      </thead>
      <tbody>
        {body_rows}
      </tbody>
    </table>
  </div>
</div>"#;

/// Placeholders: `{name}`
pub(crate) const HEADER_CELL: &str =
    r#"<th class="border border-gray-300 px-4 py-2">{name}</th>"#;

/// Placeholders: `{index}`, `{cells}`
pub(crate) const BODY_ROW: &str = r#"<tr class="hover:bg-gray-100">
          <td class="border border-gray-300 px-4 py-2 font-semibold">{index}</td>
          {cells}
        </tr>"#;

/// Placeholders: `{value}`
pub(crate) const BODY_CELL: &str = r#"<td class="border border-gray-300 px-4 py-2">{value}</td>"#;

/// Shown when the fetch fails.
///
/// Placeholders: `{message}`
pub(crate) const ERROR_PANEL: &str = r#"<div class="flex items-center justify-center min-h-screen bg-gray-100 p-4">
  <div class="w-full max-w-xl bg-white shadow-lg rounded-2xl p-6 border border-red-300">
    <h1 class="text-lg font-semibold text-red-700 mb-2">Unable to load data</h1>
    <p class="text-gray-700">{message}</p>
  </div>
</div>"#;
