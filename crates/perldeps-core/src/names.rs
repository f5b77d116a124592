//! Bidirectional translation between CPAN module names and Arch package
//! names.
//!
//! `Digest::SHA` maps to `perl-digest-sha` mechanically; the reverse
//! direction is heuristic and only as correct as its static tables, because
//! lower-casing loses capitalization (`LibXML`, `ANSIColor`). Irregular
//! segments live in plain const tables so they stay independently testable.

use perldeps_util::errors::PerldepsError;

/// Prefix carried by every Perl module package in the Arch ecosystem.
pub const PACKAGE_PREFIX: &str = "perl-";

/// Segments rendered entirely in uppercase (`sha` -> `SHA`).
const UPPER_SEGMENTS: &[&str] = &[
    "cgi", "csv", "dbi", "gd", "md5", "html", "http", "ipc", "json", "lwp", "marc", "mime", "pdf",
    "posix", "psgi", "sax", "sha", "ssl", "tcp", "ttf", "upce", "uri", "yaml", "www",
];

/// Acronyms uppercased even when embedded mid-segment (for LibXML,
/// LibXSLT, RunSQL).
const EMBEDDED_ACRONYMS: &[&str] = &["sql", "xml", "xslt"];

/// Segments with irregular capitalization that no mechanical rule covers.
const IRREGULAR_SEGMENTS: &[(&str, &str)] = &[
    ("ansicolor", "ANSIColor"),
    ("datetime", "DateTime"),
    ("formattext", "FormatText"),
    ("hires", "HiRes"),
    ("ical", "ICal"),
    ("parserfactory", "ParserFactory"),
    ("sharedir", "ShareDir"),
    ("sharedfork", "SharedFork"),
    ("timezone", "TimeZone"),
    ("useragent", "UserAgent"),
    ("urlencoded", "UrlEncoded"),
];

/// Convert a CPAN module name to the corresponding Arch package name.
///
/// Total function: lower-cases, maps `::` and `_` to `-`, and prefixes
/// with `perl-`.
pub fn to_package_name(module: &str) -> String {
    format!(
        "{PACKAGE_PREFIX}{}",
        module.to_lowercase().replace("::", "-").replace('_', "-")
    )
}

/// Convert an Arch package name back to a CPAN module name.
///
/// Heuristic inverse of [`to_package_name`]: per hyphen-separated segment,
/// consults the acronym and irregular tables, else title-cases and
/// uppercases embedded acronyms. An empty segment (`perl--foo`) is
/// reported as a strange name.
pub fn to_module_name(package: &str) -> Result<String, PerldepsError> {
    let stripped = package.strip_prefix(PACKAGE_PREFIX).unwrap_or(package);

    let mut parts = Vec::new();
    for segment in stripped.split('-') {
        if segment.is_empty() {
            return Err(PerldepsError::Name {
                message: format!("empty segment in `{package}`"),
            });
        }
        parts.push(translate_segment(segment));
    }
    Ok(parts.join("::"))
}

fn translate_segment(segment: &str) -> String {
    if UPPER_SEGMENTS.contains(&segment) {
        return segment.to_uppercase();
    }
    if let Some((_, mapped)) = IRREGULAR_SEGMENTS.iter().find(|(raw, _)| *raw == segment) {
        return (*mapped).to_string();
    }

    let mut part = title_case(segment);
    for acronym in EMBEDDED_ACRONYMS {
        part = part.replace(acronym, &acronym.to_uppercase());
        part = part.replace(&title_case(acronym), &acronym.to_uppercase());
    }
    part
}

/// Capitalize the first character, leaving the rest untouched.
fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_to_package() {
        assert_eq!(to_package_name("Digest::SHA"), "perl-digest-sha");
        assert_eq!(to_package_name("Template"), "perl-template");
        assert_eq!(
            to_package_name("Crypt::Eksblowfish::Bcrypt"),
            "perl-crypt-eksblowfish-bcrypt"
        );
        assert_eq!(to_package_name("Locale::PO"), "perl-locale-po");
    }

    #[test]
    fn underscores_become_hyphens() {
        assert_eq!(to_package_name("Data::ICal::TimeZone"), "perl-data-ical-timezone");
        assert_eq!(to_package_name("Text::CSV_XS"), "perl-text-csv-xs");
    }

    #[test]
    fn package_to_module_regular_names() {
        assert_eq!(to_module_name("perl-digest-sha").unwrap(), "Digest::SHA");
        assert_eq!(to_module_name("perl-template").unwrap(), "Template");
        assert_eq!(to_module_name("perl-test-deep").unwrap(), "Test::Deep");
    }

    #[test]
    fn irregular_segments_use_the_table() {
        assert_eq!(to_module_name("perl-term-ansicolor").unwrap(), "Term::ANSIColor");
        assert_eq!(to_module_name("perl-time-hires").unwrap(), "Time::HiRes");
        assert_eq!(
            to_module_name("perl-lwp-useragent-determined").unwrap(),
            "LWP::UserAgent::Determined"
        );
        assert_eq!(
            to_module_name("perl-datetime-timezone").unwrap(),
            "DateTime::TimeZone"
        );
    }

    #[test]
    fn embedded_acronyms_are_uppercased() {
        assert_eq!(to_module_name("perl-xml-libxml").unwrap(), "XML::LibXML");
        assert_eq!(to_module_name("perl-xml-libxslt").unwrap(), "XML::LibXSLT");
        assert_eq!(to_module_name("perl-koha-runsql").unwrap(), "Koha::RunSQL");
        assert_eq!(to_module_name("perl-dbi").unwrap(), "DBI");
    }

    #[test]
    fn round_trip_on_regular_names() {
        for module in ["Digest::SHA", "Test::More", "HTTP::Tiny", "XML::LibXML"] {
            let package = to_package_name(module);
            assert_eq!(to_module_name(&package).unwrap(), module);
        }
    }

    #[test]
    fn empty_segment_is_strange() {
        assert!(to_module_name("perl--double").is_err());
        assert!(to_module_name("perl-foo-").is_err());
    }
}
