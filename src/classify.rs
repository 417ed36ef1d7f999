//! Entry classification
//!
//! Maps a page path plus its displayed title to one of the closed set of Dash
//! entry types. Classification is static: an ordered prefix table with a
//! couple of special cases layered on top. A page no rule matches is a fatal
//! error on purpose — it means the table is out of date for a new site
//! structure and must be corrected, not silently defaulted.

use crate::DocsetError;
use std::fmt;

/// Dash entry types emitted into the search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Command,
    Error,
    Event,
    Function,
    Guide,
    Method,
    Notation,
    Object,
    Operator,
    Property,
    Section,
    Setting,
    Statement,
}

impl EntryType {
    /// Name stored in the searchIndex `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Command => "Command",
            EntryType::Error => "Error",
            EntryType::Event => "Event",
            EntryType::Function => "Function",
            EntryType::Guide => "Guide",
            EntryType::Method => "Method",
            EntryType::Notation => "Notation",
            EntryType::Object => "Object",
            EntryType::Operator => "Operator",
            EntryType::Property => "Property",
            EntryType::Section => "Section",
            EntryType::Setting => "Setting",
            EntryType::Statement => "Statement",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered (path substring, entry type) rules; the first match wins.
///
/// Keep this in sync with the structure of help.dyalog.com.
const ENTRY_TYPES: &[(&str, EntryType)] = &[
    // Functions.
    ("Language/I Beam Functions", EntryType::Function),
    ("Language/Primitive Functions", EntryType::Function),
    ("Language/System Functions", EntryType::Function),
    // Guides.
    ("DotNet", EntryType::Guide),
    ("InterfaceGuide", EntryType::Guide),
    ("Language/APL Component Files", EntryType::Guide),
    ("Language/Appendices/PCRE", EntryType::Guide),
    ("Language/Defined Functions and Operators", EntryType::Guide),
    ("Language/Introduction", EntryType::Guide),
    ("Language/Object Oriented Programming", EntryType::Guide),
    ("RelNotes", EntryType::Guide),
    ("UNIX_IUG", EntryType::Guide),
    ("UserGuide", EntryType::Guide),
    ("GUI/Examples", EntryType::Guide),
    ("Language/Error Trapping", EntryType::Guide),
    // Sections.
    ("MiscPages", EntryType::Section),
    ("GUI/Miscellaneous", EntryType::Section),
    ("GUI/SummaryTables", EntryType::Section),
    // Objects.
    ("GUI/Objects", EntryType::Object),
    // These are all sub-pages of various objects.
    ("GUI/ChildLists", EntryType::Object),
    ("GUI/EventLists", EntryType::Object),
    ("GUI/MethodLists", EntryType::Object),
    ("GUI/MethodOrEventApplies", EntryType::Object),
    ("GUI/ParentLists", EntryType::Object),
    ("GUI/PropLists", EntryType::Object),
    ("GUI/PropertyApplies", EntryType::Object),
    // Other.
    ("GUI/Properties", EntryType::Property),
    ("Language/Control Structures", EntryType::Statement),
    ("Language/Errors", EntryType::Error),
    ("Language/Primitive Operators", EntryType::Operator),
    ("Language/System Commands", EntryType::Command),
    // This is basically only for the RIDE help.
    ("Language/Symbols", EntryType::Notation),
];

/// Classifies a page into its Dash entry type.
///
/// Special cases take precedence over the prefix table: method-or-event
/// pages split on whether the title names an event, and the configuration
/// parameter pages become settings. Everything else is decided by the first
/// matching path rule.
///
/// # Errors
///
/// Returns [`DocsetError::Unclassified`] when no rule matches; callers must
/// not swallow this — an unmatched page means the table above is stale.
pub fn classify(path: &str, title: &str) -> crate::Result<EntryType> {
    if path.contains("GUI/MethodOrEvents") {
        return Ok(if title.contains(" Event") {
            EntryType::Event
        } else {
            EntryType::Method
        });
    }

    if path.contains("UserGuide/Installation and Configuration/Configuration Parameters") {
        return Ok(EntryType::Setting);
    }

    ENTRY_TYPES
        .iter()
        .find(|(prefix, _)| path.contains(prefix))
        .map(|(_, entry_type)| *entry_type)
        .ok_or_else(|| DocsetError::Unclassified {
            path: path.to_string(),
            title: title.to_string(),
        })
}
