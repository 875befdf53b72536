use url::Url;

/// Known issuers whose domains do not sanitize to a useful name on their
/// own. Matched case-insensitively as substrings of the first DNS label.
const COMPANY_SLUGS: [(&str, &str); 10] = [
    ("novartis", "novartis"),
    ("gsk", "gsk"),
    ("takeda", "takeda"),
    ("pfizer", "pfizer"),
    ("roche", "roche"),
    ("jnj", "johnson_and_johnson"),
    ("merck", "merck"),
    ("abbvie", "abbvie"),
    ("amgen", "amgen"),
    ("gilead", "gilead"),
];

const HOST_PREFIXES: [&str; 3] = ["www.", "assets-dam.", "assets."];

/// Derives a lowercase company slug from the report URL's host, or `None`
/// when the URL has no usable host and the caller should fall back to a
/// positional filename.
pub fn company_slug(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    let stripped = HOST_PREFIXES
        .iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .unwrap_or(&host);

    let label = stripped.split('.').next().unwrap_or_default();
    if label.is_empty() {
        return None;
    }

    for (needle, slug) in COMPANY_SLUGS {
        if label.contains(needle) {
            return Some(slug.to_string());
        }
    }

    let sanitized: String = label
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() {
                character.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

pub fn analysis_file_name(url: &str, fallback_index: usize) -> String {
    match company_slug(url) {
        Some(slug) => format!("{slug}_analysis.txt"),
        None => format!("report_{fallback_index}_analysis.txt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_company_is_mapped_after_prefix_strip() {
        assert_eq!(
            company_slug("https://www.pfizer.com/report.pdf"),
            Some("pfizer".to_string())
        );
        assert_eq!(
            company_slug("https://assets-dam.novartis.com/x.pdf"),
            Some("novartis".to_string())
        );
    }

    #[test]
    fn jnj_maps_to_the_long_form_name() {
        assert_eq!(
            company_slug("https://www.jnj.com/annual.pdf"),
            Some("johnson_and_johnson".to_string())
        );
    }

    #[test]
    fn substring_match_catches_investor_subdomains() {
        assert_eq!(
            company_slug("https://takeda-investors.com/q3.pdf"),
            Some("takeda".to_string())
        );
    }

    #[test]
    fn unknown_host_sanitizes_to_lowercase_alphanumerics() {
        assert_eq!(
            company_slug("https://example.com/x.pdf"),
            Some("example".to_string())
        );
        assert_eq!(
            company_slug("https://Big-Corp.org/a.pdf"),
            Some("big_corp".to_string())
        );
    }

    #[test]
    fn unparseable_url_yields_no_slug() {
        assert_eq!(company_slug("not a url"), None);
    }

    #[test]
    fn url_without_a_host_yields_no_slug() {
        assert_eq!(company_slug("data:text/plain,hello"), None);
    }

    #[test]
    fn file_name_falls_back_to_positional_form() {
        assert_eq!(
            analysis_file_name("https://www.gsk.com/r.pdf", 4),
            "gsk_analysis.txt"
        );
        assert_eq!(analysis_file_name("::::", 4), "report_4_analysis.txt");
    }
}
