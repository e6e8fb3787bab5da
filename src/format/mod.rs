//! Output formatting for listings (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::listing::{Listing, SearchResponse};

/// Formats search results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a whole search response.
    ///
    /// JSON output is the same document the HTTP API returns.
    pub fn format_response(&self, response: &SearchResponse) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
            }
            _ => self.format_listings(&response.results),
        }
    }

    /// Formats multiple listings.
    pub fn format_listings(&self, listings: &[Listing]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No listings found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_listings(listings),
            OutputFormat::Table => self.table_listings(listings),
            OutputFormat::Markdown => self.markdown_listings(listings),
            OutputFormat::Csv => self.csv_listings(listings),
        }
    }

    // JSON formatting

    fn json_listings(&self, listings: &[Listing]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_listings(&self, listings: &[Listing]) -> String {
        let platform_width = 8;
        let price_width = 14;
        let date_width = 8;
        let status_width = 8;
        let title_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<platform_width$}  {:>price_width$}  {:<date_width$}  {:<status_width$}  {}",
            "Platform", "Price", "Updated", "Status", "Title"
        ));
        lines.push(format!(
            "{:-<platform_width$}  {:-<price_width$}  {:-<date_width$}  {:-<status_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        for listing in listings {
            lines.push(format!(
                "{:<platform_width$}  {:>price_width$}  {:<date_width$}  {:<status_width$}  {}",
                listing.platform.id(),
                listing.price,
                listing.update_time,
                listing.status.label(),
                truncate(&listing.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} listings", listings.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_listings(&self, listings: &[Listing]) -> String {
        let mut lines = Vec::new();

        lines.push("| Platform | Price | Updated | Status | Location | Title |".to_string());
        lines.push("|----------|-------|---------|--------|----------|-------|".to_string());

        for listing in listings {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | [{}]({}) |",
                listing.platform.label(),
                listing.price,
                listing.update_time,
                listing.status.label(),
                listing.location.as_deref().unwrap_or(""),
                truncate(&listing.title, 40).replace('|', "\\|"),
                listing.link
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} listings found*", listings.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "platform,title,price,status,update_time,timestamp,location,link,image".to_string()
    }

    fn csv_listings(&self, listings: &[Listing]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for listing in listings {
            lines.push(format!(
                "{},{},{},{},{},{},{},{},{}",
                listing.platform.id(),
                Self::csv_escape(&listing.title),
                Self::csv_escape(&listing.price),
                listing.status.label(),
                listing.update_time,
                listing.timestamp,
                listing.location.as_deref().map(Self::csv_escape).unwrap_or_default(),
                listing.link,
                Self::csv_escape(&listing.image)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens to `max` characters (not bytes), marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{Platform, Status};

    fn make_bunjang() -> Listing {
        Listing {
            platform: Platform::Bunjang,
            title: "맥북 에어 M2 미개봉".to_string(),
            price: "1,250,000원".to_string(),
            link: "https://bunjang.co.kr/products/228917364".to_string(),
            update_time: "24-12-16".to_string(),
            timestamp: 1_734_300_000,
            status: Status::OnSale,
            image: "https://media.bunjang.co.kr/product/228917364.jpg".to_string(),
            location: None,
        }
    }

    fn make_joongna() -> Listing {
        Listing {
            platform: Platform::Joongna,
            title: "아이패드, 펜슬 \"세트\"".to_string(),
            price: "가격문의".to_string(),
            link: "https://m.joongna.com/product/195733221".to_string(),
            update_time: "24-12-15".to_string(),
            timestamp: 1_734_200_000,
            status: Status::Reserved,
            image: "https://via.placeholder.com/300x300?text=No+Image".to_string(),
            location: Some("서울 마포구".to_string()),
        }
    }

    fn make_response(results: Vec<Listing>) -> SearchResponse {
        SearchResponse {
            keyword: "맥북".to_string(),
            timestamp: "2024-12-16T07:00:00.000Z".to_string(),
            results,
        }
    }

    #[test]
    fn test_json_listings() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_listings(&[make_bunjang(), make_joongna()]);

        let parsed: Vec<Listing> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].location.as_deref(), Some("서울 마포구"));
    }

    #[test]
    fn test_json_response_has_wire_shape() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_response(&make_response(vec![make_bunjang()]));

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["keyword"], "맥북");
        assert_eq!(value["results"][0]["updateTime"], "24-12-16");
        assert_eq!(value["results"][0]["platform"], "번개장터");
    }

    #[test]
    fn test_json_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_listings(&[]), "[]");
    }

    #[test]
    fn test_table_listings() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_listings(&[make_bunjang(), make_joongna()]);

        assert!(output.contains("Platform"));
        assert!(output.contains("bunjang"));
        assert!(output.contains("joongna"));
        assert!(output.contains("1,250,000원"));
        assert!(output.contains("예약중"));
        assert!(output.contains("Total: 2 listings"));
    }

    #[test]
    fn test_table_from_response() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_response(&make_response(vec![make_bunjang()]));
        assert!(output.contains("Total: 1 listings"));
    }

    #[test]
    fn test_table_long_korean_title_truncation() {
        let mut listing = make_bunjang();
        listing.title = "가".repeat(60);

        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_listings(&[listing]);

        assert!(output.contains(&format!("{}...", "가".repeat(37))));
        assert!(!output.contains(&"가".repeat(38)));
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_listings(&[]), "No listings found.");
    }

    #[test]
    fn test_markdown_listings() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_listings(&[make_bunjang(), make_joongna()]);

        assert!(output.contains("| Platform | Price |"));
        assert!(output.contains("번개장터"));
        assert!(output.contains("서울 마포구"));
        assert!(output.contains("(https://m.joongna.com/product/195733221)"));
        assert!(output.contains("*2 listings found*"));
    }

    #[test]
    fn test_markdown_empty() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        assert_eq!(formatter.format_listings(&[]), "No listings found.");
    }

    #[test]
    fn test_csv_header() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_listings(&[]);
        assert_eq!(output, "platform,title,price,status,update_time,timestamp,location,link,image");
    }

    #[test]
    fn test_csv_escapes_commas_and_quotes() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_listings(&[make_bunjang(), make_joongna()]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("bunjang,맥북 에어 M2 미개봉,\"1,250,000원\",판매중,"));
        assert!(lines[2].contains("\"아이패드, 펜슬 \"\"세트\"\"\""));
        assert!(lines[2].contains(",1734200000,서울 마포구,"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 10), "abcdefghij");
        assert_eq!(truncate("abcdefghijk", 10), "abcdefg...");
    }
}
