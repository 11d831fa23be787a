//! Role and organization extraction from the auth subsystem's user profile.
//!
//! The profile shape is not owned here and has changed over time, so both
//! fields are resolved through ordered rule tables. Each rule is a pure
//! function over the profile record; the first rule that yields a value wins.
//! Nothing in this module fails: an unresolvable field is simply absent and
//! the backend falls back to token-derived identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Read-only user record handed over by the auth subsystem.
///
/// Accepts either the bare record or a response envelope
/// `{status, message, data: {...}}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Value);

impl UserProfile {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// # Errors
    /// Returns an error if `input` is not valid JSON.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input).map(Self)
    }

    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// The user record itself, unwrapping a `data` envelope when present.
    #[must_use]
    pub fn record(&self) -> Option<&Map<String, Value>> {
        let outer = self.0.as_object()?;
        match outer.get("data").and_then(Value::as_object) {
            Some(inner) => Some(inner),
            None => Some(outer),
        }
    }

    #[must_use]
    pub fn login(&self) -> Option<&str> {
        self.text_field("login")
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.text_field("email")
    }

    fn text_field(&self, key: &str) -> Option<&str> {
        self.record()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrgType {
    Lender,
    Municipality,
    Munify,
    Government,
    /// Unrecognised value, lowercased and trimmed.
    Other(String),
}

impl OrgType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lender => "lender",
            Self::Municipality => "municipality",
            Self::Munify => "munify",
            Self::Government => "government",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for OrgType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for OrgType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Identifiers used to scope the menus query. Derived fresh per fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoleContext {
    pub role_id: Option<u64>,
    pub org_type: Option<OrgType>,
}

impl RoleContext {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.role_id.is_some() && self.org_type.is_some()
    }

    /// Query parameters for the menus endpoint; unresolved fields are omitted.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(role_id) = self.role_id {
            params.push(("role_id", role_id.to_string()));
        }
        if let Some(org_type) = self.org_type.as_ref().filter(|org| !org.as_str().is_empty()) {
            params.push(("org_type", org_type.to_string()));
        }
        params
    }
}

type Record = Map<String, Value>;
type RoleRule = fn(&Record) -> Option<u64>;
type OrgRule = fn(&Record) -> Option<OrgType>;

const ROLE_ID_ALIASES: &[&str] = &["roleId", "role_id"];
const ORG_TYPE_ALIASES: &[&str] = &["org_type", "orgType", "organizationType", "organization_type"];

/// Role id rules in priority order.
const ROLE_RULES: &[(&str, RoleRule)] = &[
    ("userRoles[0].roleId", nested_role_id),
    ("roleId", direct_role_id),
];

/// Org type rules in priority order.
const ORG_RULES: &[(&str, OrgRule)] = &[
    ("org_type", direct_org_type),
    ("userType", user_type_org),
    ("branchName", branch_name_org),
];

/// A vocabulary entry: exact codes, then case-insensitive substrings.
struct OrgTerm {
    org: OrgType,
    codes: &'static [&'static str],
    keywords: &'static [&'static str],
}

const ORG_TYPE_TERMS: &[OrgTerm] = &[
    OrgTerm {
        org: OrgType::Lender,
        codes: &[],
        keywords: &["lender"],
    },
    OrgTerm {
        org: OrgType::Municipality,
        codes: &[],
        keywords: &["municipal"],
    },
    OrgTerm {
        org: OrgType::Munify,
        codes: &[],
        keywords: &["munify", "admin"],
    },
    OrgTerm {
        org: OrgType::Government,
        codes: &[],
        keywords: &["government", "niua"],
    },
];

const USER_TYPE_TERMS: &[OrgTerm] = &[
    OrgTerm {
        org: OrgType::Municipality,
        codes: &["m"],
        keywords: &["municipal"],
    },
    OrgTerm {
        org: OrgType::Lender,
        codes: &["l"],
        keywords: &["lender"],
    },
    OrgTerm {
        org: OrgType::Munify,
        codes: &["a"],
        keywords: &["admin", "munify"],
    },
    OrgTerm {
        org: OrgType::Government,
        codes: &[],
        keywords: &["government", "niua"],
    },
];

const BRANCH_NAME_TERMS: &[OrgTerm] = &[
    OrgTerm {
        org: OrgType::Lender,
        codes: &[],
        keywords: &["lender"],
    },
    OrgTerm {
        org: OrgType::Municipality,
        codes: &[],
        keywords: &["municipal"],
    },
    OrgTerm {
        org: OrgType::Munify,
        codes: &[],
        keywords: &["munify", "admin"],
    },
];

fn classify(value: &str, terms: &[OrgTerm]) -> Option<OrgType> {
    let lowered = value.trim().to_lowercase();
    terms
        .iter()
        .find(|term| {
            term.codes.contains(&lowered.as_str())
                || term.keywords.iter().any(|keyword| lowered.contains(keyword))
        })
        .map(|term| term.org.clone())
}

/// Positive integer ids only; `0` counts as unresolved.
fn role_id_value(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

fn first_text<'a>(record: &'a Record, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| record.get(*alias).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

fn nested_role_id(record: &Record) -> Option<u64> {
    record
        .get("userRoles")?
        .as_array()?
        .first()?
        .get("roleId")
        .and_then(role_id_value)
}

fn direct_role_id(record: &Record) -> Option<u64> {
    ROLE_ID_ALIASES
        .iter()
        .find_map(|alias| record.get(*alias).and_then(role_id_value))
}

fn direct_org_type(record: &Record) -> Option<OrgType> {
    let raw = first_text(record, ORG_TYPE_ALIASES)?;
    Some(classify(raw, ORG_TYPE_TERMS).unwrap_or_else(|| OrgType::Other(raw.to_lowercase())))
}

fn user_type_org(record: &Record) -> Option<OrgType> {
    classify(first_text(record, &["userType"])?, USER_TYPE_TERMS)
}

fn branch_name_org(record: &Record) -> Option<OrgType> {
    classify(first_text(record, &["branchName"])?, BRANCH_NAME_TERMS)
}

/// Derives the role context used to scope the menus query.
#[must_use]
pub fn extract_role_context(profile: &UserProfile) -> RoleContext {
    let Some(record) = profile.record() else {
        return RoleContext::default();
    };

    let role_id = ROLE_RULES.iter().find_map(|(name, rule)| {
        let role_id = rule(record)?;
        debug!(rule = name, role_id, "resolved role id");
        Some(role_id)
    });

    let org_type = ORG_RULES.iter().find_map(|(name, rule)| {
        let org_type = rule(record)?;
        debug!(rule = name, org_type = %org_type, "resolved org type");
        Some(org_type)
    });

    RoleContext { role_id, org_type }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: Value) -> RoleContext {
        extract_role_context(&UserProfile::new(value))
    }

    #[test]
    fn nested_role_and_direct_org_type() {
        let ctx = context(json!({"userRoles": [{"roleId": 7}], "org_type": "Lender"}));
        assert_eq!(
            ctx,
            RoleContext {
                role_id: Some(7),
                org_type: Some(OrgType::Lender)
            }
        );
    }

    #[test]
    fn envelope_is_unwrapped() {
        let ctx = context(json!({
            "status": "success",
            "message": "ok",
            "data": {"userRoles": [{"roleId": 3}], "orgType": "MUNICIPALITY", "login": "asha"}
        }));
        assert_eq!(ctx.role_id, Some(3));
        assert_eq!(ctx.org_type, Some(OrgType::Municipality));
    }

    #[test]
    fn role_id_aliases_are_tried_in_order() {
        assert_eq!(context(json!({"roleId": 4})).role_id, Some(4));
        assert_eq!(context(json!({"role_id": "5"})).role_id, Some(5));
        assert_eq!(
            context(json!({"userRoles": [{"roleId": 0}], "role_id": 9})).role_id,
            Some(9)
        );
        assert_eq!(context(json!({"userRoles": [], "roleId": "abc"})).role_id, None);
    }

    #[test]
    fn org_type_containment_vocabulary() {
        let cases = [
            ("Private Lender", OrgType::Lender),
            ("Municipal Corporation", OrgType::Municipality),
            ("Munify", OrgType::Munify),
            ("Super Admin", OrgType::Munify),
            ("NIUA", OrgType::Government),
            ("State Government", OrgType::Government),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                context(json!({"organization_type": raw})).org_type,
                Some(expected),
                "raw {raw:?}"
            );
        }
    }

    #[test]
    fn unknown_org_type_is_kept_lowercased() {
        assert_eq!(
            context(json!({"org_type": "  Consultant "})).org_type,
            Some(OrgType::Other("consultant".to_string()))
        );
    }

    #[test]
    fn user_type_codes_and_keywords() {
        assert_eq!(
            context(json!({"userType": "M"})).org_type,
            Some(OrgType::Municipality)
        );
        assert_eq!(context(json!({"userType": "l"})).org_type, Some(OrgType::Lender));
        assert_eq!(context(json!({"userType": "A"})).org_type, Some(OrgType::Munify));
        assert_eq!(
            context(json!({"userType": "niua staff"})).org_type,
            Some(OrgType::Government)
        );
        assert_eq!(context(json!({"userType": "x"})).org_type, None);
    }

    #[test]
    fn branch_name_is_the_last_resort() {
        let ctx = context(json!({"branchName": "City Lender Branch"}));
        assert_eq!(ctx.org_type, Some(OrgType::Lender));

        let ctx = context(json!({"userType": "unknown", "branchName": "Munify HQ"}));
        assert_eq!(ctx.org_type, Some(OrgType::Munify));

        let ctx = context(json!({"branchName": "Government Office"}));
        assert_eq!(ctx.org_type, None);
    }

    #[test]
    fn unresolvable_profile_leaves_both_absent() {
        assert_eq!(context(json!({"login": "asha"})), RoleContext::default());
        assert_eq!(context(json!(null)), RoleContext::default());
        assert_eq!(context(json!(["not", "a", "record"])), RoleContext::default());
    }

    #[test]
    fn query_params_omit_unresolved_fields() {
        let ctx = RoleContext {
            role_id: Some(7),
            org_type: None,
        };
        assert_eq!(ctx.query_params(), vec![("role_id", "7".to_string())]);
        assert!(!ctx.is_complete());
        assert!(RoleContext::default().query_params().is_empty());

        let ctx = RoleContext {
            role_id: None,
            org_type: Some(OrgType::Government),
        };
        assert_eq!(ctx.query_params(), vec![("org_type", "government".to_string())]);
    }

    #[test]
    fn profile_footer_fields() {
        let profile = UserProfile::new(json!({"data": {"login": " asha ", "email": ""}}));
        assert_eq!(profile.login(), Some("asha"));
        assert_eq!(profile.email(), None);
    }
}
