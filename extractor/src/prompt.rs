/// Instruction template sent to both backends. `{text}` marks where the
/// extracted page text goes.
pub const PROMPT_TEMPLATE: &str = r#"
Extract the following structured financial information from the provided text:
- Total GAAP Revenue
- Total Gross Profit
- Total Net Income (Loss)
- Total Adjusted EBITDA
- E-commerce Revenue
- Digital Financial Services Revenue
- Digital Entertainment Revenue
- E-commerce Gross Orders
- E-commerce GMV

Text: {text}

Structured Data:

### Fourth Quarter 2023 Highlights
| Metric                    | Q4 2022 (USD)     | Q4 2023 (USD)     | Year-on-Year Growth (%) |
| **Total GAAP Revenue**    |                   |                   |                         |

### Full Year 2023 Highlights
| Metric                    | FY 2022 (USD)     | FY 2023 (USD)     | Year-on-Year Growth (%) |
| **Total GAAP Revenue**    |                   |                   |                         |

### Segment-Specific Revenue and Adjusted EBITDA for Full Year 2023
| Segment                     | Revenue (USD)      | Adjusted EBITDA (USD) |
| **E-commerce**              |                    |                       |

"#;

const PLACEHOLDER: &str = "{text}";

pub fn format_prompt(text: &str) -> String {
    PROMPT_TEMPLATE.replacen(PLACEHOLDER, text, 1)
}
