//! Form state management and form structs

use super::field::FormField;
use crate::state::{Link, LinkKind, OpenTarget};

/// Options for the link kind choice field, in wire order
const KIND_OPTIONS: &[&str] = &["embed", "external", "protocol"];
/// Options for the open-target choice field
const OPEN_IN_OPTIONS: &[&str] = &["pane", "new-tab"];

fn kind_index(kind: LinkKind) -> usize {
    match kind {
        LinkKind::Embed => 0,
        LinkKind::External => 1,
        LinkKind::Protocol => 2,
    }
}

fn open_in_index(target: OpenTarget) -> usize {
    match target {
        OpenTarget::Pane => 0,
        OpenTarget::NewTab => 1,
    }
}

/// Focus handling shared by the forms
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;

    /// Move focus forward, wrapping past the last field
    fn next_field(&mut self) {
        self.set_active_field((self.active_field() + 1) % self.field_count());
    }

    /// Move focus backward, wrapping past the first field
    fn prev_field(&mut self) {
        let count = self.field_count();
        self.set_active_field((self.active_field() + count - 1) % count);
    }
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    LinkCreate(LinkForm),
    LinkEdit(LinkForm),
    SectionCreate(SectionForm),
}

impl FormState {
    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::LinkCreate(f) | FormState::LinkEdit(f) => f.next_field(),
            FormState::SectionCreate(f) => f.next_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::LinkCreate(f) | FormState::LinkEdit(f) => f.prev_field(),
            FormState::SectionCreate(f) => f.prev_field(),
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self {
            FormState::None => None,
            FormState::LinkCreate(f) | FormState::LinkEdit(f) => Some(f.get_active_field_mut()),
            FormState::SectionCreate(f) => Some(f.get_active_field_mut()),
        }
    }

    pub fn is_active_field_multiline(&self) -> bool {
        match self {
            FormState::None => false,
            FormState::LinkCreate(f) | FormState::LinkEdit(f) => f
                .get_field(f.active_field())
                .is_some_and(|f| f.is_multiline),
            FormState::SectionCreate(f) => f
                .get_field(f.active_field())
                .is_some_and(|f| f.is_multiline),
        }
    }
}

/// Link create/edit form
#[derive(Debug, Clone)]
pub struct LinkForm {
    pub name: FormField,
    pub url: FormField,
    pub section: FormField,
    pub kind: FormField,
    pub open_in: FormField,
    pub order: FormField,
    pub description: FormField,
    pub active_field_index: usize,
}

impl LinkForm {
    /// Blank form for a new link in a section
    pub fn new(section_slug: &str) -> Self {
        Self {
            name: FormField::text("name", "Name", false),
            url: FormField::text("url", "URL", false),
            section: FormField::text_with_value(
                "section",
                "Section",
                section_slug.to_string(),
                false,
            ),
            kind: FormField::choice("kind", "Kind", KIND_OPTIONS),
            open_in: FormField::choice("open_in", "Open in", OPEN_IN_OPTIONS),
            order: FormField::order("order", "Order"),
            description: FormField::text("description", "Description", true),
            active_field_index: 0,
        }
    }

    /// Form pre-filled from an existing link
    pub fn from_link(link: &Link) -> Self {
        Self {
            name: FormField::text_with_value("name", "Name", link.name.clone(), false),
            url: FormField::text_with_value("url", "URL", link.url.clone(), false),
            section: FormField::text_with_value(
                "section",
                "Section",
                link.section.clone(),
                false,
            ),
            kind: FormField::choice_with_value("kind", "Kind", KIND_OPTIONS, kind_index(link.kind)),
            open_in: FormField::choice_with_value(
                "open_in",
                "Open in",
                OPEN_IN_OPTIONS,
                open_in_index(link.open_in),
            ),
            order: FormField::order_with_value("order", "Order", link.order),
            description: FormField::text_with_value(
                "description",
                "Description",
                link.description.clone().unwrap_or_default(),
                true,
            ),
            active_field_index: 0,
        }
    }

    /// Selected link kind
    pub fn kind_value(&self) -> LinkKind {
        match self.kind.as_choice() {
            "external" => LinkKind::External,
            "protocol" => LinkKind::Protocol,
            _ => LinkKind::Embed,
        }
    }

    /// Selected open target
    pub fn open_in_value(&self) -> OpenTarget {
        match self.open_in.as_choice() {
            "new-tab" => OpenTarget::NewTab,
            _ => OpenTarget::Pane,
        }
    }

    /// Description field, mapped to None when empty
    pub fn description_value(&self) -> Option<String> {
        let text = self.description.as_text();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    /// Name and URL are required before a save is attempted
    pub fn is_valid(&self) -> bool {
        !self.name.as_text().is_empty() && !self.url.as_text().is_empty()
    }

    /// Fields in focus order
    fn fields(&self) -> [&FormField; 7] {
        [
            &self.name,
            &self.url,
            &self.section,
            &self.kind,
            &self.open_in,
            &self.order,
            &self.description,
        ]
    }
}

impl Form for LinkForm {
    fn field_count(&self) -> usize {
        self.fields().len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields().len() - 1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.url,
            2 => &mut self.section,
            3 => &mut self.kind,
            4 => &mut self.open_in,
            5 => &mut self.order,
            _ => &mut self.description,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields().get(index).copied()
    }
}

/// Section create form
#[derive(Debug, Clone)]
pub struct SectionForm {
    pub name: FormField,
    pub slug: FormField,
    pub icon: FormField,
    pub order: FormField,
    pub active_field_index: usize,
}

impl SectionForm {
    pub fn new(next_order: u32) -> Self {
        Self {
            name: FormField::text("name", "Name", false),
            slug: FormField::text("slug", "Slug (optional)", false),
            icon: FormField::text("icon", "Icon", false),
            order: FormField::order_with_value("order", "Order", next_order),
            active_field_index: 0,
        }
    }

    /// Explicit slug if given, otherwise derived from the name
    pub fn slug_value(&self) -> String {
        let explicit = self.slug.as_text();
        if !explicit.is_empty() {
            return explicit.to_string();
        }
        slugify(self.name.as_text())
    }

    pub fn is_valid(&self) -> bool {
        !self.name.as_text().is_empty()
    }

    /// Fields in focus order
    fn fields(&self) -> [&FormField; 4] {
        [&self.name, &self.slug, &self.icon, &self.order]
    }
}

impl Form for SectionForm {
    fn field_count(&self) -> usize {
        self.fields().len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields().len() - 1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.slug,
            2 => &mut self.icon,
            _ => &mut self.order,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields().get(index).copied()
    }
}

/// Lowercase, spaces to dashes, everything else alphanumeric-only
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if (c == ' ' || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OpenTarget;
    use chrono::Utc;

    fn test_link() -> Link {
        Link {
            id: "crm".to_string(),
            name: "CRM".to_string(),
            url: "https://crm.example.com".to_string(),
            section: "utilities".to_string(),
            kind: LinkKind::External,
            order: 3,
            description: Some("Customer records".to_string()),
            open_in: OpenTarget::NewTab,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    mod form_state_enum {
        use super::*;

        #[test]
        fn test_default_is_none() {
            let state = FormState::default();
            assert!(matches!(state, FormState::None));
        }

        #[test]
        fn test_next_field_on_none_is_noop() {
            let mut state = FormState::None;
            state.next_field();
        }

        #[test]
        fn test_get_active_field_mut_none_returns_none() {
            let mut state = FormState::None;
            assert!(state.get_active_field_mut().is_none());
        }

        #[test]
        fn test_next_field_cycles_through_form() {
            let mut state = FormState::LinkCreate(LinkForm::new("reports"));
            state.next_field();
            if let FormState::LinkCreate(ref f) = state {
                assert_eq!(f.active_field_index, 1);
            }
        }

        #[test]
        fn test_is_active_field_multiline() {
            let mut form = LinkForm::new("reports");
            assert!(!FormState::LinkCreate(form.clone()).is_active_field_multiline());
            form.active_field_index = 6; // description
            assert!(FormState::LinkCreate(form).is_active_field_multiline());
        }
    }

    mod link_form {
        use super::*;

        #[test]
        fn test_new_prefills_section() {
            let form = LinkForm::new("reports");
            assert_eq!(form.section.as_text(), "reports");
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.kind_value(), LinkKind::Embed);
            assert_eq!(form.open_in_value(), OpenTarget::Pane);
        }

        #[test]
        fn test_from_link_loads_values() {
            let form = LinkForm::from_link(&test_link());
            assert_eq!(form.name.as_text(), "CRM");
            assert_eq!(form.url.as_text(), "https://crm.example.com");
            assert_eq!(form.section.as_text(), "utilities");
            assert_eq!(form.kind_value(), LinkKind::External);
            assert_eq!(form.open_in_value(), OpenTarget::NewTab);
            assert_eq!(form.order.as_order(), 3);
            assert_eq!(form.description.as_text(), "Customer records");
        }

        #[test]
        fn test_field_count_and_cycling() {
            let mut form = LinkForm::new("reports");
            assert_eq!(form.field_count(), 7);
            for _ in 0..7 {
                form.next_field();
            }
            assert_eq!(form.active_field_index, 0);
            form.prev_field();
            assert_eq!(form.active_field_index, 6);
        }

        #[test]
        fn test_validation_requires_name_and_url() {
            let mut form = LinkForm::new("reports");
            assert!(!form.is_valid());
            form.name.push_char('a');
            assert!(!form.is_valid());
            form.url.push_char('u');
            assert!(form.is_valid());
        }

        #[test]
        fn test_empty_description_maps_to_none() {
            let form = LinkForm::new("reports");
            assert_eq!(form.description_value(), None);
        }

        #[test]
        fn test_get_field_returns_correct_fields() {
            let form = LinkForm::new("reports");
            assert_eq!(form.get_field(0).unwrap().name, "name");
            assert_eq!(form.get_field(3).unwrap().name, "kind");
            assert_eq!(form.get_field(6).unwrap().name, "description");
            assert!(form.get_field(7).is_none());
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = LinkForm::new("reports");
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 6);
        }
    }

    mod section_form {
        use super::*;

        #[test]
        fn test_slug_derived_from_name() {
            let mut form = SectionForm::new(4);
            for c in "PAYG Pipeline".chars() {
                form.name.push_char(c);
            }
            assert_eq!(form.slug_value(), "payg-pipeline");
        }

        #[test]
        fn test_explicit_slug_wins() {
            let mut form = SectionForm::new(0);
            for c in "Reports".chars() {
                form.name.push_char(c);
            }
            for c in "custom".chars() {
                form.slug.push_char(c);
            }
            assert_eq!(form.slug_value(), "custom");
        }

        #[test]
        fn test_order_prefilled() {
            let form = SectionForm::new(6);
            assert_eq!(form.order.as_order(), 6);
        }

        #[test]
        fn test_validation_requires_name() {
            let mut form = SectionForm::new(0);
            assert!(!form.is_valid());
            form.name.push_char('x');
            assert!(form.is_valid());
        }
    }

    mod slugify_fn {
        use super::*;

        #[test]
        fn test_basic() {
            assert_eq!(slugify("Field Service"), "field-service");
        }

        #[test]
        fn test_collapses_separators_and_trims() {
            assert_eq!(slugify("  PAYG -- Pipeline  "), "payg-pipeline");
        }

        #[test]
        fn test_strips_punctuation() {
            assert_eq!(slugify("Q4 (EMEA) Report!"), "q4-emea-report");
        }
    }
}
