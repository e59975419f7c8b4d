//! # Vault View
//!
//! Pure renderers for the vault list and the entry dialog.

use crate::repl::models::{EntryId, VaultEntrySummary};
use crate::repl::view_models::CheckMessage;

/// Placeholder shown instead of a hidden password
pub const MASKED_PASSWORD: &str = "••••••••";

/// One selectable row of the vault list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryNode {
    pub id: EntryId,
    pub title: String,
    pub username: String,
}

/// Rebuilt vault list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultListView {
    pub empty_indicator_visible: bool,
    pub nodes: Vec<EntryNode>,
}

/// Build one node per record in server order
pub fn render_vault_list(entries: &[VaultEntrySummary]) -> VaultListView {
    VaultListView {
        empty_indicator_visible: entries.is_empty(),
        nodes: entries
            .iter()
            .map(|entry| EntryNode {
                id: entry.id,
                title: entry.title.clone(),
                username: entry.display_username().to_string(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStyle {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessageView {
    pub text: String,
    pub style: CheckStyle,
}

/// Strength check message, hidden when no check ran yet
pub fn render_check_message(message: Option<&CheckMessage>) -> Option<CheckMessageView> {
    message.map(|message| CheckMessageView {
        text: message.text.clone(),
        style: if message.passed {
            CheckStyle::Success
        } else {
            CheckStyle::Error
        },
    })
}

/// Password field content; hidden passwords never reveal their length
pub fn render_password(password: &str, visible: bool) -> String {
    if visible {
        password.to_string()
    } else if password.is_empty() {
        String::new()
    } else {
        MASKED_PASSWORD.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_should_show_indicator_and_no_nodes() {
        let view = render_vault_list(&[]);
        assert!(view.empty_indicator_visible);
        assert!(view.nodes.is_empty());
    }

    #[test]
    fn list_should_render_one_node_per_record_in_order() {
        let entries = vec![
            VaultEntrySummary::new(5, "Mail", "bob"),
            VaultEntrySummary::new(2, "Bank", "alice"),
            VaultEntrySummary {
                id: 8,
                title: "Wifi".to_string(),
                username: None,
            },
        ];
        let view = render_vault_list(&entries);
        assert!(!view.empty_indicator_visible);
        assert_eq!(view.nodes.len(), 3);
        let ids: Vec<EntryId> = view.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![5, 2, 8]);
        assert_eq!(view.nodes[2].username, "");
    }

    #[test]
    fn check_message_should_pick_style() {
        let passed = CheckMessage {
            text: "No problems found with the password!".to_string(),
            passed: true,
        };
        let failed = CheckMessage {
            text: "Password has been seen 3 times before".to_string(),
            passed: false,
        };
        assert_eq!(
            render_check_message(Some(&passed)).map(|v| v.style),
            Some(CheckStyle::Success)
        );
        assert_eq!(
            render_check_message(Some(&failed)).map(|v| v.style),
            Some(CheckStyle::Error)
        );
        assert_eq!(render_check_message(None), None);
    }

    #[test]
    fn hidden_password_should_be_masked() {
        assert_eq!(render_password("p@ss", false), MASKED_PASSWORD);
        assert_eq!(render_password("p@ss", true), "p@ss");
        assert_eq!(render_password("", false), "");
    }
}
