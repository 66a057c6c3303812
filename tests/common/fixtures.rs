//! Static upload corpora and AI analysis fixtures used across harnesses.
//!
//! Every `UPLOAD_*` constant is a complete file body whose record count is
//! listed next to it in [`VALID_UPLOADS`].

use serde_json::{json, Value};

pub const UPLOAD_JSON: &str = r#"[
  {"timestamp":"2024-01-15T10:00:00Z","type":"error","message":"Checkout button unresponsive","page":"/cart"},
  {"timestamp":"2024-01-15T10:00:01Z","type":"performance","message":"LCP 4.8s on /home","lcp_ms":4800},
  {"timestamp":"2024-01-15T10:00:02Z","type":"info","message":"User signed in"}
]"#;

pub const UPLOAD_NDJSON: &str = "\
{\"ts\":\"2024-01-15T10:00:00Z\",\"level\":\"error\",\"msg\":\"Form submit failed\"}

{\"ts\":\"2024-01-15T10:00:01Z\",\"level\":\"warn\",\"msg\":\"Slow response\",\"responseTime\":3200}

{\"ts\":\"2024-01-15T10:00:02Z\",\"level\":\"info\",\"msg\":\"Retry succeeded\"}
";

pub const UPLOAD_CSV: &str = "\
timestamp,type,message,page
2024-01-15T10:00:00Z,error,\"Payment failed, card declined\",/checkout
2024-01-15T10:00:01Z,accessibility,Image missing alt text,/home
";

pub const UPLOAD_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<logs>
  <log type="error" timestamp="2024-01-15T10:00:00Z">
    <message>Modal traps keyboard focus</message>
    <page>/settings</page>
  </log>
  <log type="info" timestamp="2024-01-15T10:00:01Z">
    <message>Settings saved</message>
  </log>
</logs>"#;

pub const UPLOAD_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Console export</title><script>var hidden = 1;</script></head>
  <body>
    <div class="error">Uncaught TypeError: cart is undefined</div>
    <p>Layout shift detected<br>CLS 0.31</p>
  </body>
</html>"#;

pub const UPLOAD_HAR: &str = r#"{
  "log": {
    "version": "1.2",
    "creator": {"name": "WebInspector", "version": "537.36"},
    "entries": [
      {
        "startedDateTime": "2024-01-15T10:00:00.000Z",
        "time": 120.4,
        "request": {"method": "GET", "url": "https://shop.test/"},
        "response": {"status": 200}
      },
      {
        "startedDateTime": "2024-01-15T10:00:01.000Z",
        "time": 5230.9,
        "request": {"method": "POST", "url": "https://shop.test/api/checkout"},
        "response": {"status": 504}
      }
    ]
  }
}"#;

pub const UPLOAD_TEXT: &str = "\
2024-01-15 10:00:00 ERROR Failed to load /api/products (timeout)

2024-01-15 10:00:01 WARN  Button tap target smaller than 24px
2024-01-15 10:00:02 INFO  Page rendered
";

/// `(filename, body, expected entry count)` for every supported extension.
pub const VALID_UPLOADS: &[(&str, &str, usize)] = &[
    ("events.json", UPLOAD_JSON, 3),
    ("events.ndjson", UPLOAD_NDJSON, 3),
    ("events.jsonl", UPLOAD_NDJSON, 3),
    ("events.csv", UPLOAD_CSV, 2),
    ("events.xml", UPLOAD_XML, 2),
    ("console.html", UPLOAD_HTML, 4),
    ("console.htm", UPLOAD_HTML, 4),
    ("session.har", UPLOAD_HAR, 2),
    ("app.txt", UPLOAD_TEXT, 3),
    ("app.log", UPLOAD_TEXT, 3),
];

/// The end-to-end AI answer: one high-severity performance issue.
pub fn ai_response_minimal() -> Value {
    json!({
        "uxScore": 85,
        "issues": [{
            "id": "issue-1",
            "severity": "high",
            "description": "Test issue",
            "category": "Performance",
            "metadata": {}
        }],
        "categories": { "Performance": 1 },
        "recommendations": [],
        "metadata": {
            "totalIssues": 1,
            "criticalCount": 0,
            "highCount": 1,
            "mediumCount": 0,
            "lowCount": 0,
            "analysisModel": "test-model"
        }
    })
}

/// A realistic AI answer with two categories, typed metadata and
/// recommendations listed out of priority order.
pub fn ai_response_full() -> Value {
    json!({
        "uxScore": 62,
        "issues": [
            {
                "id": "issue-1",
                "type": "performance",
                "severity": "high",
                "description": "Checkout API responds slowly",
                "category": "Performance",
                "metadata": { "responseTime": 5230, "endpoint": "/api/checkout" }
            },
            {
                "id": "issue-2",
                "type": "accessibility",
                "severity": "medium",
                "description": "Product images lack alternative text",
                "category": "Accessibility",
                "metadata": { "wcagCriteria": ["1.1.1"], "occurrences": 14 }
            },
            {
                "id": "issue-3",
                "type": "performance",
                "severity": "low",
                "description": "Large layout shift on product page",
                "category": "Performance",
                "metadata": {}
            }
        ],
        "categories": { "Performance": 2, "Accessibility": 1 },
        "recommendations": [
            {
                "priority": 2,
                "title": "Add alt text to product images",
                "description": "Describe each product image.",
                "why": "Screen reader users cannot identify products.",
                "references": ["https://www.w3.org/WAI/WCAG22/Understanding/non-text-content"],
                "estimatedImpact": "medium"
            },
            {
                "priority": 1,
                "title": "Speed up checkout API",
                "description": "Cache pricing lookups.",
                "why": "Slow checkout drives abandonment.",
                "references": ["https://web.dev/articles/lcp", "https://web.dev/articles/inp"],
                "estimatedImpact": "high"
            },
            {
                "priority": 3,
                "title": "Reserve space for images",
                "description": "Set width and height attributes.",
                "why": "Content jumps while loading.",
                "references": [],
                "estimatedImpact": "low"
            }
        ],
        "metadata": {
            "totalIssues": 3,
            "criticalCount": 0,
            "highCount": 1,
            "mediumCount": 1,
            "lowCount": 1,
            "analysisModel": "ux-analyst-1"
        }
    })
}
