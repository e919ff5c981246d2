//! Display order for scan results: flagged names first, then by collated name.

use crate::entry::Entry;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Name comparison for the user's locale.
///
/// Built once per session. When no usable locale is configured (unset, `C`,
/// `POSIX`) or the collator cannot be loaded, names fall back to a fixed
/// accent- and case-insensitive key.
pub struct Collation {
    locale: Option<String>,
    collator: Option<Collator>,
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("locale", &self.locale)
            .field("icu", &self.collator.is_some())
            .finish()
    }
}

impl Default for Collation {
    fn default() -> Self {
        Collation::from_env()
    }
}

impl Collation {
    /// Locale from `LC_ALL`, `LC_COLLATE`, `LANG` (first non-empty wins),
    /// then whatever the platform reports.
    pub fn from_env() -> Self {
        let configured = ["LC_ALL", "LC_COLLATE", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty())
            .or_else(sys_locale::get_locale);
        match configured {
            Some(value) => Collation::for_locale(&value),
            None => Collation::fallback(),
        }
    }

    /// Accepts POSIX names (`sv_SE.UTF-8@euro`) as well as BCP 47 tags (`sv-SE`).
    pub fn for_locale(name: &str) -> Self {
        let Some(tag) = bcp47_tag(name) else {
            return Collation::fallback();
        };
        let locale: Locale = match tag.parse() {
            Ok(l) => l,
            Err(e) => {
                warn!(locale = %name, error = ?e, "unparsable locale, using fallback collation");
                return Collation::fallback();
            }
        };
        match Collator::try_new(&(&locale).into(), CollatorOptions::new()) {
            Ok(collator) => {
                debug!(locale = %tag, "locale collation ready");
                Collation {
                    locale: Some(tag),
                    collator: Some(collator),
                }
            }
            Err(e) => {
                warn!(locale = %tag, error = ?e, "no collation data, using fallback collation");
                Collation::fallback()
            }
        }
    }

    pub fn fallback() -> Self {
        Collation {
            locale: None,
            collator: None,
        }
    }

    /// The locale in use, or `None` for the fixed fallback order.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Total order over names. Raw code points break ties the collation
    /// considers equal.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
            None => primary_key(a)
                .cmp(&primary_key(b))
                .then_with(|| a.nfkd().cmp(b.nfkd()))
                .then_with(|| a.cmp(b)),
        }
    }
}

// "sv_SE.UTF-8@euro" -> "sv-SE". C/POSIX mean "no locale".
fn bcp47_tag(name: &str) -> Option<String> {
    let base = name.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Fallback primary key: compatibility-decomposed, accents dropped, lowercased.
fn primary_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

thread_local! {
    static SYSTEM_COLLATION: Collation = Collation::from_env();
}

/// Compare two names with the environment's collation.
pub fn collate(a: &str, b: &str) -> Ordering {
    SYSTEM_COLLATION.with(|collation| collation.compare(a, b))
}

pub fn compare(a: &Entry, b: &Entry, collation: &Collation) -> Ordering {
    b.flagged()
        .cmp(&a.flagged())
        .then_with(|| collation.compare(a.display_name(), b.display_name()))
}

pub fn sort(entries: &mut [Entry], collation: &Collation) {
    match &collation.collator {
        Some(_) => entries.sort_by(|a, b| compare(a, b, collation)),
        // Same order as `Collation::compare`, with each key built once.
        None => entries.sort_by_cached_key(|e| {
            let name = e.display_name();
            (
                !e.flagged(),
                primary_key(name),
                name.nfkd().collect::<String>(),
                name.to_string(),
            )
        }),
    }
}
