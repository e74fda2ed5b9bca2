//! Field type-code tables.
//!
//! Header fields and record fields share numeric values but mean different
//! things (0x07 is "last saved by user" in the header block and "creation
//! time" inside a record), so the two namespaces get separate tables and
//! are never mixed.

/// Marks the end of the header block or of one record. Shared by both
/// namespaces; its payload is always empty.
pub const END_OF_ENTRY: u8 = 0xff;

/// How a field's payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 16 raw bytes.
    Uuid,
    /// At least 4 bytes; the first 4 are epoch seconds, little-endian.
    Time,
    /// Byte string, treated as UTF-8 where possible.
    Text,
    /// Two raw bytes: minor then major.
    Version,
    /// Anything else, kept verbatim.
    Opaque,
}

pub mod header {
    use super::FieldKind;

    pub const VERSION: u8 = 0x00;
    pub const UUID: u8 = 0x01;
    pub const NONDEFAULT_PREFERENCES: u8 = 0x02;
    pub const TREE_DISPLAY_STATUS: u8 = 0x03;
    pub const TIMESTAMP_OF_LAST_SAVE: u8 = 0x04;
    pub const WHO_PERFORMED_LAST_SAVE: u8 = 0x05;
    pub const WHAT_PERFORMED_LAST_SAVE: u8 = 0x06;
    pub const LAST_SAVED_BY_USER: u8 = 0x07;
    pub const LAST_SAVED_ON_HOST: u8 = 0x08;
    pub const DATABASE_NAME: u8 = 0x09;
    pub const DATABASE_DESCRIPTION: u8 = 0x0a;
    pub const DATABASE_FILTERS: u8 = 0x0b;
    pub const RECENTLY_USED_ENTRIES: u8 = 0x0f;
    pub const NAMED_PASSWORD_POLICIES: u8 = 0x10;
    pub const EMPTY_GROUPS: u8 = 0x11;
    pub const YUBICO: u8 = 0x12;
    pub const LAST_MASTER_PASSWORD_CHANGE: u8 = 0x13;

    pub fn kind(type_code: u8) -> FieldKind {
        match type_code {
            VERSION => FieldKind::Version,
            UUID => FieldKind::Uuid,
            TIMESTAMP_OF_LAST_SAVE | LAST_MASTER_PASSWORD_CHANGE => FieldKind::Time,
            NONDEFAULT_PREFERENCES
            | TREE_DISPLAY_STATUS
            | WHO_PERFORMED_LAST_SAVE
            | WHAT_PERFORMED_LAST_SAVE
            | LAST_SAVED_BY_USER
            | LAST_SAVED_ON_HOST
            | DATABASE_NAME
            | DATABASE_DESCRIPTION
            | DATABASE_FILTERS
            | RECENTLY_USED_ENTRIES
            | NAMED_PASSWORD_POLICIES
            | EMPTY_GROUPS
            | YUBICO => FieldKind::Text,
            _ => FieldKind::Opaque,
        }
    }

    pub fn name(type_code: u8) -> &'static str {
        match type_code {
            VERSION => "version",
            UUID => "uuid",
            NONDEFAULT_PREFERENCES => "preferences",
            TREE_DISPLAY_STATUS => "tree-display-status",
            TIMESTAMP_OF_LAST_SAVE => "last-save",
            WHO_PERFORMED_LAST_SAVE => "last-save-user",
            WHAT_PERFORMED_LAST_SAVE => "last-save-app",
            LAST_SAVED_BY_USER => "saved-by-user",
            LAST_SAVED_ON_HOST => "saved-on-host",
            DATABASE_NAME => "database-name",
            DATABASE_DESCRIPTION => "database-description",
            DATABASE_FILTERS => "database-filters",
            RECENTLY_USED_ENTRIES => "recently-used",
            NAMED_PASSWORD_POLICIES => "password-policies",
            EMPTY_GROUPS => "empty-groups",
            YUBICO => "yubico",
            LAST_MASTER_PASSWORD_CHANGE => "last-password-change",
            _ => "unknown",
        }
    }
}

pub mod record {
    use super::FieldKind;

    pub const UUID: u8 = 0x01;
    pub const GROUP: u8 = 0x02;
    pub const TITLE: u8 = 0x03;
    pub const USERNAME: u8 = 0x04;
    pub const NOTES: u8 = 0x05;
    pub const PASSWORD: u8 = 0x06;
    pub const CREATION_TIME: u8 = 0x07;
    pub const PASSWORD_MODIFICATION_TIME: u8 = 0x08;
    pub const LAST_ACCESS_TIME: u8 = 0x09;
    pub const PASSWORD_EXPIRY_TIME: u8 = 0x0a;
    pub const LAST_MODIFICATION_TIME: u8 = 0x0c;
    pub const URL: u8 = 0x0d;
    pub const AUTOTYPE: u8 = 0x0e;
    pub const PASSWORD_HISTORY: u8 = 0x0f;
    pub const PASSWORD_POLICY: u8 = 0x10;
    pub const PASSWORD_EXPIRY_INTERVAL: u8 = 0x11;
    pub const RUN_COMMAND: u8 = 0x12;
    pub const DOUBLE_CLICK_ACTION: u8 = 0x13;
    pub const EMAIL_ADDRESS: u8 = 0x14;
    pub const PROTECTED_ENTRY: u8 = 0x15;
    pub const OWN_SYMBOLS: u8 = 0x16;
    pub const SHIFT_DOUBLE_CLICK_ACTION: u8 = 0x17;
    pub const PASSWORD_POLICY_NAME: u8 = 0x18;
    pub const ENTRY_KEYBOARD_SHORTCUT: u8 = 0x19;
    pub const CREDIT_CARD_NUMBER: u8 = 0x1a;
    pub const CREDIT_CARD_EXPIRATION: u8 = 0x1b;
    pub const CREDIT_CARD_VERIF_VALUE: u8 = 0x1c;
    pub const CREDIT_CARD_PIN: u8 = 0x1d;
    pub const QR_CODE: u8 = 0x1e;

    pub fn kind(type_code: u8) -> FieldKind {
        match type_code {
            UUID => FieldKind::Uuid,
            CREATION_TIME
            | PASSWORD_MODIFICATION_TIME
            | LAST_ACCESS_TIME
            | PASSWORD_EXPIRY_TIME
            | LAST_MODIFICATION_TIME => FieldKind::Time,
            GROUP
            | TITLE
            | USERNAME
            | NOTES
            | PASSWORD
            | URL
            | AUTOTYPE
            | PASSWORD_HISTORY
            | PASSWORD_POLICY
            | RUN_COMMAND
            | EMAIL_ADDRESS
            | OWN_SYMBOLS
            | PASSWORD_POLICY_NAME
            | CREDIT_CARD_NUMBER
            | CREDIT_CARD_EXPIRATION
            | CREDIT_CARD_VERIF_VALUE
            | CREDIT_CARD_PIN
            | QR_CODE => FieldKind::Text,
            // Known-binary types (expiry interval, click actions, shortcuts)
            // and anything we have no table entry for stay opaque.
            _ => FieldKind::Opaque,
        }
    }

    pub fn name(type_code: u8) -> &'static str {
        match type_code {
            UUID => "uuid",
            GROUP => "group",
            TITLE => "title",
            USERNAME => "username",
            NOTES => "notes",
            PASSWORD => "password",
            CREATION_TIME => "created",
            PASSWORD_MODIFICATION_TIME => "password-modified",
            LAST_ACCESS_TIME => "last-access",
            PASSWORD_EXPIRY_TIME => "password-expiry",
            LAST_MODIFICATION_TIME => "modified",
            URL => "url",
            AUTOTYPE => "autotype",
            PASSWORD_HISTORY => "password-history",
            PASSWORD_POLICY => "password-policy",
            PASSWORD_EXPIRY_INTERVAL => "password-expiry-interval",
            RUN_COMMAND => "run-command",
            DOUBLE_CLICK_ACTION => "double-click-action",
            EMAIL_ADDRESS => "email",
            PROTECTED_ENTRY => "protected",
            OWN_SYMBOLS => "own-symbols",
            SHIFT_DOUBLE_CLICK_ACTION => "shift-double-click-action",
            PASSWORD_POLICY_NAME => "password-policy-name",
            ENTRY_KEYBOARD_SHORTCUT => "keyboard-shortcut",
            CREDIT_CARD_NUMBER => "cc-number",
            CREDIT_CARD_EXPIRATION => "cc-expiration",
            CREDIT_CARD_VERIF_VALUE => "cc-verification",
            CREDIT_CARD_PIN => "cc-pin",
            QR_CODE => "qr-code",
            _ => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_disagree_on_shared_codes() {
        // 0x07 is a text field in the header block but a timestamp in records.
        assert_eq!(header::kind(0x07), FieldKind::Text);
        assert_eq!(record::kind(0x07), FieldKind::Time);
    }

    #[test]
    fn unknown_codes_are_opaque() {
        assert_eq!(header::kind(0x7f), FieldKind::Opaque);
        assert_eq!(record::kind(0x7f), FieldKind::Opaque);
        assert_eq!(record::name(0x7f), "unknown");
    }

    #[test]
    fn version_is_header_only() {
        assert_eq!(header::kind(0x00), FieldKind::Version);
        assert_eq!(record::kind(0x00), FieldKind::Opaque);
    }
}
