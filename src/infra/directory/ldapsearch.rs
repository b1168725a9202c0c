//! Directory adapter over OpenLDAP's `ldapsearch` CLI.
//!
//! Binds anonymously (`-x`) and reads LDIF from standard output. Groups are
//! `posixGroup` entries listing members in `memberUid`; accounts are
//! `posixAccount` entries keyed by `uid`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::core::{Directory, SyncError};
use crate::infra::command::CommandRunner;

/// Connection parameters for [`LdapsearchDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdapsearchSettings {
    /// `ldapsearch` binary.
    pub program: PathBuf,
    /// Server URI, e.g. `ldaps://ldap.example.org`.
    pub uri: String,
    /// Search base for group entries.
    pub group_base: String,
    /// Search base for account entries.
    pub people_base: String,
}

/// Escape a value for use inside an LDAP search filter (RFC 4515).
pub fn escape_filter_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '*' => out.push_str("\\2a"),
            '(' => out.push_str("\\28"),
            ')' => out.push_str("\\29"),
            '\\' => out.push_str("\\5c"),
            '\0' => out.push_str("\\00"),
            _ => out.push(c),
        }
    }
    out
}

/// Unfold LDIF continuation lines and return `(attribute, value)` pairs.
///
/// Base64 values (`attr:: ...`) are decoded and must be UTF-8; comments are
/// dropped.
pub fn parse_ldif(text: &str) -> Result<Vec<(String, String)>, SyncError> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let raw = raw.trim_end_matches('\r');
        if let Some(rest) = raw.strip_prefix(' ') {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        lines.push(raw.to_string());
    }

    let mut pairs = Vec::new();
    for line in lines.iter().filter(|l| !l.is_empty() && !l.starts_with('#')) {
        let Some((attr, value)) = line.split_once(':') else {
            continue;
        };
        let value = match value.strip_prefix(':') {
            Some(encoded) => decode_base64_value(attr, encoded.trim())?,
            None => value.trim().to_string(),
        };
        pairs.push((attr.to_string(), value));
    }
    Ok(pairs)
}

fn decode_base64_value(attr: &str, encoded: &str) -> Result<String, SyncError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| SyncError::InvalidOutput(format!("bad base64 in `{attr}`: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| SyncError::InvalidOutput(format!("`{attr}` is not UTF-8: {e}")))
}

/// [`Directory`] backed by `ldapsearch`.
#[derive(Debug, Clone)]
pub struct LdapsearchDirectory {
    runner: CommandRunner,
    settings: LdapsearchSettings,
}

impl LdapsearchDirectory {
    /// Adapter for the given settings.
    pub fn new(settings: LdapsearchSettings) -> Self {
        Self {
            runner: CommandRunner::new(settings.program.clone()),
            settings,
        }
    }

    /// Settings this adapter searches with.
    pub const fn settings(&self) -> &LdapsearchSettings {
        &self.settings
    }

    async fn search(
        &self,
        base: &str,
        filter: &str,
        attr: &str,
    ) -> Result<Vec<(String, String)>, SyncError> {
        let args = [
            "-x",
            "-LLL",
            "-H",
            self.settings.uri.as_str(),
            "-b",
            base,
            filter,
            attr,
        ];
        tracing::debug!(base, filter, "running ldapsearch");
        let output = self.runner.output(args).await?;
        if !output.success() {
            let err = self.runner.failure(output);
            return Err(SyncError::Directory(err.to_string()));
        }
        parse_ldif(output.stdout_utf8()?)
    }
}

#[async_trait]
impl Directory for LdapsearchDirectory {
    async fn list_group(&self, group: &str) -> Result<BTreeSet<String>, SyncError> {
        let filter = format!(
            "(&(objectClass=posixGroup)(cn={}))",
            escape_filter_value(group)
        );
        let pairs = self
            .search(&self.settings.group_base, &filter, "memberUid")
            .await?;
        if !pairs.iter().any(|(attr, _)| attr.eq_ignore_ascii_case("dn")) {
            return Err(SyncError::GroupNotFound(group.to_string()));
        }
        Ok(pairs
            .into_iter()
            .filter(|(attr, _)| attr.eq_ignore_ascii_case("memberUid"))
            .map(|(_, value)| value)
            .collect())
    }

    async fn user_exists(&self, user: &str) -> Result<bool, SyncError> {
        let filter = format!(
            "(&(objectClass=posixAccount)(uid={}))",
            escape_filter_value(user)
        );
        let pairs = self.search(&self.settings.people_base, &filter, "dn").await?;
        Ok(pairs.iter().any(|(attr, _)| attr.eq_ignore_ascii_case("dn")))
    }
}
