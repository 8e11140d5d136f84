//! File-type classification by extension.
//!
//! A pure lookup used to select per-type parser settings and to decide
//! whether a path is worth running through the text reader at all.
//! Extensions outside the known parser set fall back to a coarse
//! MIME-style category, then to [`FileType::Unknown`].

use std::fmt;
use std::path::Path;

/// Type tag assigned to a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Java,
    Xml,
    Jsp,
    Sql,
    Csv,
    Yaml,
    Properties,
    Txt,
    Json,
    Vue,
    Jsx,
    Tsx,
    Js,
    Ts,
    Html,
    Css,
    Scss,
    Sass,
    /// Coarse category: textual but not a known parser target.
    Text,
    Image,
    Audio,
    Video,
    Application,
    Unknown,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Xml => "xml",
            Self::Jsp => "jsp",
            Self::Sql => "sql",
            Self::Csv => "csv",
            Self::Yaml => "yaml",
            Self::Properties => "properties",
            Self::Txt => "txt",
            Self::Json => "json",
            Self::Vue => "vue",
            Self::Jsx => "jsx",
            Self::Tsx => "tsx",
            Self::Js => "js",
            Self::Ts => "ts",
            Self::Html => "html",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Sass => "sass",
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Application => "application",
            Self::Unknown => "unknown",
        }
    }

    /// Anything we could put a name on is supported.
    pub fn is_supported(self) -> bool {
        self != Self::Unknown
    }

    /// Is this type eligible for text processing (reading, text digests)?
    pub fn is_textual(self) -> bool {
        !matches!(
            self,
            Self::Image | Self::Audio | Self::Video | Self::Application | Self::Unknown
        )
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a path by its extension.
pub fn classify(path: &Path) -> FileType {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FileType::Unknown;
    };

    match ext.to_ascii_lowercase().as_str() {
        "java" => FileType::Java,
        "xml" => FileType::Xml,
        "jsp" => FileType::Jsp,
        "sql" => FileType::Sql,
        "csv" => FileType::Csv,
        "yaml" | "yml" => FileType::Yaml,
        "properties" => FileType::Properties,
        "txt" => FileType::Txt,
        "json" => FileType::Json,
        "vue" => FileType::Vue,
        "jsx" => FileType::Jsx,
        "tsx" => FileType::Tsx,
        "js" => FileType::Js,
        "ts" => FileType::Ts,
        "html" | "htm" => FileType::Html,
        "css" => FileType::Css,
        "scss" => FileType::Scss,
        "sass" => FileType::Sass,
        // Coarse categories for everything else we can still name.
        "md" | "markdown" | "rst" | "log" | "cfg" | "ini" | "conf" | "toml" => FileType::Text,
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "svg" | "ico" | "webp" => FileType::Image,
        "mp3" | "wav" | "ogg" | "flac" => FileType::Audio,
        "mp4" | "avi" | "mkv" | "mov" | "webm" => FileType::Video,
        "pdf" | "zip" | "jar" | "war" | "gz" | "tar" | "class" => FileType::Application,
        _ => FileType::Unknown,
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_parser_extensions() {
        assert_eq!(classify(Path::new("Main.java")), FileType::Java);
        assert_eq!(classify(Path::new("pom.xml")), FileType::Xml);
        assert_eq!(classify(Path::new("view.jsp")), FileType::Jsp);
        assert_eq!(classify(Path::new("schema.SQL")), FileType::Sql);
        assert_eq!(classify(Path::new("config.yml")), FileType::Yaml);
        assert_eq!(classify(Path::new("index.htm")), FileType::Html);
    }

    #[test]
    fn coarse_categories() {
        assert_eq!(classify(Path::new("README.md")), FileType::Text);
        assert_eq!(classify(Path::new("logo.png")), FileType::Image);
        assert_eq!(classify(Path::new("lib.jar")), FileType::Application);
    }

    #[test]
    fn unknown_extension_and_no_extension() {
        assert_eq!(classify(Path::new("file.xyz123")), FileType::Unknown);
        assert_eq!(classify(Path::new("Makefile")), FileType::Unknown);
    }

    #[test]
    fn support_and_text_eligibility() {
        assert!(FileType::Java.is_supported());
        assert!(FileType::Image.is_supported());
        assert!(!FileType::Unknown.is_supported());

        assert!(FileType::Java.is_textual());
        assert!(FileType::Text.is_textual());
        assert!(!FileType::Image.is_textual());
        assert!(!FileType::Unknown.is_textual());
    }
}
