//! Runtime Configuration

use std::borrow::Cow;

use serde::Deserialize;

/// Runtime configuration options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace URI used for SVG elements
    pub svg_namespace: String,

    /// Tags that open the SVG namespace; descendants inherit it
    pub svg_tags: Vec<String>,

    /// Attribute names set with their exact case; all others are lower-cased
    pub case_sensitive_attributes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            svg_namespace: fos_dom::SVG_NAMESPACE.to_string(),
            svg_tags: [
                "svg", "path", "g", "circle", "ellipse", "line", "polyline", "polygon", "rect",
                "defs", "use", "symbol", "marker", "clipPath", "mask", "pattern",
                "linearGradient", "radialGradient", "stop", "tspan", "foreignObject",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            case_sensitive_attributes: [
                "viewBox", "preserveAspectRatio", "gradientUnits", "gradientTransform",
                "patternUnits", "patternContentUnits", "patternTransform", "clipPathUnits",
                "maskUnits", "maskContentUnits", "markerWidth", "markerHeight", "markerUnits",
                "refX", "refY", "pathLength", "textLength", "lengthAdjust", "startOffset",
                "spreadMethod", "stdDeviation", "filterUnits", "primitiveUnits",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Parse a JSON configuration; missing fields keep their defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True if `tag` opens the SVG namespace
    pub fn is_svg_tag(&self, tag: &str) -> bool {
        self.svg_tags.iter().any(|t| t == tag)
    }

    /// Attribute name as it is handed to the platform
    pub fn attribute_name<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.case_sensitive_attributes.iter().any(|a| a == key)
            || !key.bytes().any(|b| b.is_ascii_uppercase())
        {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(key.to_ascii_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_case() {
        let config = Config::default();
        assert_eq!(config.attribute_name("viewBox"), "viewBox");
        assert_eq!(config.attribute_name("tabIndex"), "tabindex");
        assert_eq!(config.attribute_name("data-id"), "data-id");
    }

    #[test]
    fn test_from_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "svg_tags": ["svg", "my-icon"] }"#).unwrap();

        assert!(config.is_svg_tag("my-icon"));
        assert!(!config.is_svg_tag("path"));
        assert_eq!(config.svg_namespace, fos_dom::SVG_NAMESPACE);
        assert_eq!(config.attribute_name("viewBox"), "viewBox");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Config::from_json("{ svg_tags: 3 }"),
            Err(crate::Error::Config(_))
        ));
    }
}
