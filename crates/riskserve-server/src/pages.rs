//! Inline-rendered pages for the form and dashboard front-ends

use riskserve_core::schema;

/// Home page with the comma-separated entry form
///
/// `prediction_text` carries the success or error sentence from a prior
/// submission; the page itself renders the same either way.
pub fn home_page(prediction_text: Option<&str>) -> String {
    let result_block = match prediction_text {
        Some(text) => format!("<p class=\"result\">{}</p>", escape(text)),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Mortality Risk Prediction</title></head>
<body>
<h1>Mortality Risk Prediction</h1>
<form action="/predict_page" method="post">
  <label for="features">Enter all {count} feature values, comma-separated, in order:</label><br>
  <textarea id="features" name="features" rows="4" cols="80"></textarea><br>
  <button type="submit">Predict</button>
</form>
{result_block}
</body>
</html>
"#,
        count = schema::FIELD_COUNT,
    )
}

/// Interactive dashboard with the quick-input subset of fields
pub fn dashboard_page() -> String {
    let inputs: String = QUICK_FIELDS
        .iter()
        .map(|(field, label)| {
            format!(
                "  <div><label>{label}</label> <input data-field=\"{}\" value=\"\"></div>\n",
                escape(field)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Mortality Risk Dashboard</title></head>
<body>
<h1>Mortality Risk Dashboard</h1>
<div id="inputs">
{inputs}</div>
<button id="predict">Predict</button>
<div id="output"></div>
<script>
let clicks = 0;
document.getElementById('predict').addEventListener('click', async () => {{
  clicks += 1;
  const values = {{}};
  document.querySelectorAll('#inputs input').forEach(el => {{
    if (el.value !== '') values[el.dataset.field] = el.value;
  }});
  const response = await fetch('/api/assess', {{
    method: 'POST',
    headers: {{ 'Content-Type': 'application/json' }},
    body: JSON.stringify({{ n_clicks: clicks, values }}),
  }});
  const result = await response.json();
  const output = document.getElementById('output');
  output.textContent = result.message;
  output.className = result.severity;
}});
</script>
</body>
</html>
"#,
    )
}

/// The subset of fields the dashboard offers for quick entry; everything
/// else is sent as missing.
const QUICK_FIELDS: &[(&str, &str)] = &[
    ("Year", "Year"),
    (schema::SEX_FIELD, "Sex"),
    ("Tobacco Price\nIndex", "Tobacco Price Index"),
    ("Retail Prices\nIndex", "Retail Prices Index"),
    ("smoking_prevalence", "Smoking Prevalence (%)"),
    ("total_prescriptions", "Total Prescriptions"),
    ("nrt_prescription_ratio", "NRT Prescription Ratio"),
];

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
}
