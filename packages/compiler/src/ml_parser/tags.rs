//! ML Parser Tags

/// Tag content types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagContentType {
    /// `<script>`, `<style>`: no markup, no entities
    RawText,
    /// `<textarea>`, `<title>`: no markup, entities decoded
    EscapableRawText,
    ParsableData,
}

/// Tag definition interface
pub trait TagDefinition: Sync {
    fn closed_by_parent(&self) -> bool;
    fn is_void(&self) -> bool;
    fn ignore_first_lf(&self) -> bool;
    fn can_self_close(&self) -> bool;
    fn is_closed_by_child(&self, name: &str) -> bool;
    fn content_type(&self) -> TagContentType;
}

/// Custom elements carry a dash in their name and may always self-close.
pub fn is_custom_element_name(name: &str) -> bool {
    name.contains('-')
}
