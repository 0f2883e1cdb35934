use regex::Regex;

use crate::content::EmbedId;

/// Finds `{{< shortcode ID >}}` embeds in a post body
pub struct EmbedScanner {
    regex: Regex,
}

impl EmbedScanner {
    pub fn new(shortcode: &str) -> Result<EmbedScanner, regex::Error> {
        let patt = format!(
            r"\{{\{{<\s*{}\s+(?P<id>[A-Za-z0-9_-]+)\s*>\}}\}}",
            regex::escape(shortcode)
        );
        let regex = Regex::new(&patt)?;
        Ok(EmbedScanner { regex })
    }

    /// Id of the first embed in the content, if any
    pub fn extract_id(&self, content: &str) -> Option<EmbedId> {
        self.regex.captures(content)
            .and_then(|cap| cap.name("id"))
            .map(|id| EmbedId(id.as_str().to_string()))
    }
}
