// In-memory document the controllers render into
use crate::domain::dashboard::Badge;
use crate::domain::form::{FileUpload, FormSubmission};
use crate::domain::format::escape_html;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};

pub type SharedPage = Arc<Mutex<Page>>;

pub fn shared(page: Page) -> SharedPage {
    Arc::new(Mutex::new(page))
}

/// Lock the page, recovering from a poisoned lock. Never hold the guard across an await.
pub fn lock(page: &SharedPage) -> MutexGuard<'_, Page> {
    page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Statistics cards, addressed by the `data-stat` key of their counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatCardId {
    Residents,
    Households,
    Blotters,
    Clearances,
}

impl StatCardId {
    pub const ALL: [StatCardId; 4] = [
        StatCardId::Residents,
        StatCardId::Households,
        StatCardId::Blotters,
        StatCardId::Clearances,
    ];

    pub fn data_key(&self) -> &'static str {
        match self {
            StatCardId::Residents => "total_residents",
            StatCardId::Households => "total_households",
            StatCardId::Blotters => "active_blotters",
            StatCardId::Clearances => "clearances_issued_month",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub sub: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub title: String,
    pub sub: String,
    pub badge: Badge,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
    pub loading: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Error => "error-message",
            ToastKind::Success => "success-message",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub disabled: bool,
    pub options: Vec<SelectOption>,
}

impl Field {
    pub fn input(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A type-specific group of fields (`{type}Fields`), hidden and disabled until selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Fieldset {
    pub id: String,
    pub visible: bool,
    pub fields: Vec<Field>,
}

impl Fieldset {
    pub fn new(id: impl Into<String>, names: &[&str]) -> Self {
        Self {
            id: id.into(),
            visible: false,
            fields: names
                .iter()
                .map(|name| Field {
                    disabled: true,
                    ..Field::input(*name)
                })
                .collect(),
        }
    }

    fn set_active(&mut self, active: bool) {
        self.visible = active;
        for field in &mut self.fields {
            field.disabled = !active;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub id: String,
    pub visible: bool,
    pub fields: Vec<Field>,
    pub fieldsets: Vec<Fieldset>,
    pub file_input: Option<String>,
    pub file: Option<FileUpload>,
    pub preview_src: Option<String>,
    pub dragging: bool,
    pub submit: Button,
}

impl ModalView {
    pub fn new(id: impl Into<String>, submit_label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visible: false,
            fields: Vec::new(),
            fieldsets: Vec::new(),
            file_input: None,
            file: None,
            preview_src: None,
            dragging: false,
            submit: Button::new(submit_label),
        }
    }

    pub fn with_fields(mut self, names: &[&str]) -> Self {
        self.fields.extend(names.iter().map(|name| Field::input(*name)));
        self
    }

    pub fn with_fieldset(mut self, fieldset: Fieldset) -> Self {
        self.fieldsets.push(fieldset);
        self
    }

    pub fn with_file_input(mut self, name: impl Into<String>) -> Self {
        self.file_input = Some(name.into());
        self
    }

    /// Value of an enabled control, as a form submission would see it.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.enabled_fields()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Set a control's value. Top-level controls win over field sets, and
    /// within field sets an enabled control wins over a disabled one.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value;
            return true;
        }

        let enabled = self
            .fieldsets
            .iter()
            .flat_map(|set| set.fields.iter())
            .any(|f| f.name == name && !f.disabled);
        let target = self
            .fieldsets
            .iter_mut()
            .flat_map(|set| set.fields.iter_mut())
            .find(|f| f.name == name && (!enabled || !f.disabled));

        match target {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .chain(self.fieldsets.iter().flat_map(|set| set.fields.iter()))
            .find(|field| field.name == name)
    }

    /// Replace a select's options, placeholder first. A selection that is no
    /// longer offered falls back to the placeholder.
    pub fn set_options(&mut self, name: &str, placeholder: &str, options: Vec<SelectOption>) {
        let field = self
            .fields
            .iter_mut()
            .chain(self.fieldsets.iter_mut().flat_map(|set| set.fields.iter_mut()))
            .find(|field| field.name == name);

        if let Some(field) = field {
            field.options = std::iter::once(SelectOption::new("", placeholder))
                .chain(options)
                .collect();
            if !field.options.iter().any(|option| option.value == field.value) {
                field.value.clear();
            }
        }
    }

    /// Hide and disable every field set, then show and enable `{record_type}Fields`.
    pub fn show_fieldset_for(&mut self, record_type: &str) {
        let active_id = format!("{record_type}Fields");
        for fieldset in &mut self.fieldsets {
            let active = !record_type.is_empty() && fieldset.id == active_id;
            fieldset.set_active(active);
        }
    }

    pub fn fieldset(&self, id: &str) -> Option<&Fieldset> {
        self.fieldsets.iter().find(|set| set.id == id)
    }

    /// Clear every control value and the chosen file. Options and the preview stay.
    pub fn reset_form(&mut self) {
        for field in self
            .fields
            .iter_mut()
            .chain(self.fieldsets.iter_mut().flat_map(|set| set.fields.iter_mut()))
        {
            field.value.clear();
        }
        self.file = None;
        self.dragging = false;
    }

    /// Form data of the enabled controls plus the chosen file.
    pub fn collect(&self) -> FormSubmission {
        let mut submission = FormSubmission::default();
        for field in self.enabled_fields() {
            submission.push(field.name.clone(), field.value.clone());
        }
        if let (Some(name), Some(file)) = (&self.file_input, &self.file) {
            submission.file = Some((name.clone(), file.clone()));
        }
        submission
    }

    fn enabled_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .chain(self.fieldsets.iter().flat_map(|set| set.fields.iter()))
            .filter(|field| !field.disabled)
    }

    fn render_html(&self, html: &mut String) {
        let _ = write!(
            html,
            "<div class=\"modal\" id=\"{}\"><form{}>",
            escape_html(&self.id),
            if self.dragging { " class=\"dragging\"" } else { "" }
        );
        for field in &self.fields {
            write_field(html, field);
        }
        for fieldset in self.fieldsets.iter().filter(|set| set.visible) {
            let _ = write!(html, "<fieldset id=\"{}\">", escape_html(&fieldset.id));
            for field in &fieldset.fields {
                write_field(html, field);
            }
            html.push_str("</fieldset>");
        }
        if let Some(name) = &self.file_input {
            let _ = write!(html, "<input type=\"file\" name=\"{}\">", escape_html(name));
        }
        if let Some(src) = &self.preview_src {
            let _ = write!(html, "<img class=\"preview\" src=\"{}\">", escape_html(src));
        }
        write_button(html, "submit-btn", &self.submit);
        html.push_str("</form></div>");
    }
}

fn write_field(html: &mut String, field: &Field) {
    let disabled = if field.disabled { " disabled" } else { "" };
    if field.options.is_empty() {
        let _ = write!(
            html,
            "<input name=\"{}\" value=\"{}\"{}>",
            escape_html(&field.name),
            escape_html(&field.value),
            disabled
        );
        return;
    }

    let _ = write!(html, "<select name=\"{}\"{}>", escape_html(&field.name), disabled);
    for option in &field.options {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape_html(&option.value),
            if option.value == field.value { " selected" } else { "" },
            escape_html(&option.label)
        );
    }
    html.push_str("</select>");
}

fn write_button(html: &mut String, class: &str, button: &Button) {
    let _ = write!(
        html,
        "<button class=\"{}{}\"{}>{}</button>",
        class,
        if button.loading { " loading" } else { "" },
        if button.disabled { " disabled" } else { "" },
        escape_html(&button.label)
    );
}

/// The dashboard document: regions keyed by stable identifiers plus the
/// page-level side effects (overlay, toasts, navigation, reload).
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub hidden: bool,
    pub body_scroll_locked: bool,
    pub stat_cards: BTreeMap<StatCardId, StatCard>,
    pub recent_residents: Vec<String>,
    pub open_blotters: Vec<String>,
    pub clearance_summary: Vec<ListItem>,
    pub refresh_button: Button,
    pub overlays: usize,
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
    pub modals: BTreeMap<String, ModalView>,
    pub location: Option<String>,
    pub reloads: usize,
}

impl Page {
    pub fn show_overlay(&mut self) {
        self.overlays += 1;
    }

    pub fn hide_overlay(&mut self) {
        self.overlays = self.overlays.saturating_sub(1);
    }

    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn navigate(&mut self, path: impl Into<String>) {
        self.location = Some(path.into());
    }

    pub fn reload(&mut self) {
        self.reloads += 1;
    }

    pub fn modal(&self, id: &str) -> Option<&ModalView> {
        self.modals.get(id)
    }

    pub fn modal_mut(&mut self, id: &str) -> Option<&mut ModalView> {
        self.modals.get_mut(id)
    }

    pub fn add_modal(&mut self, modal: ModalView) {
        self.modals.insert(modal.id.clone(), modal);
    }

    pub fn render_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(html, "<main class=\"dashboard\"{}", if self.hidden { " hidden" } else { "" });
        if let Some(location) = &self.location {
            let _ = write!(html, " data-location=\"{}\"", escape_html(location));
        }
        if self.body_scroll_locked {
            html.push_str(" data-scroll-locked");
        }
        html.push('>');

        html.push_str("<header class=\"dashboard-header\">");
        write_button(&mut html, "refresh-btn", &self.refresh_button);
        html.push_str("<button class=\"new-record-btn\">+ New Record</button></header>");

        html.push_str("<section class=\"stats\">");
        for (id, card) in &self.stat_cards {
            let _ = write!(
                html,
                "<div class=\"stat-card\" data-stat=\"{}\"><div class=\"stat-title\">{}</div><div class=\"stat-value\">{}</div>",
                id.data_key(),
                escape_html(&card.title),
                escape_html(&card.value)
            );
            if let Some(sub) = &card.sub {
                let _ = write!(html, "<div class=\"stat-sub\">{}</div>", escape_html(sub));
            }
            html.push_str("</div>");
        }
        html.push_str("</section>");

        let _ = write!(
            html,
            "<section class=\"panel\" data-region=\"recent-residents\"><h3>Recent Residents</h3><button class=\"link-btn\">View all</button><table class=\"table\"><tbody>{}</tbody></table></section>",
            self.recent_residents.concat()
        );
        let _ = write!(
            html,
            "<section class=\"panel\" data-region=\"open-blotters\"><h3>Open Blotters</h3><button class=\"link-btn\">View all</button><ul class=\"list\">{}</ul></section>",
            self.open_blotters.concat()
        );

        html.push_str("<section class=\"panel\" data-region=\"clearance-summary\"><h3>Clearances</h3><button class=\"link-btn\">Manage</button><ul class=\"list\">");
        for item in &self.clearance_summary {
            let _ = write!(
                html,
                "<li><div><div class=\"list-title\">{}</div><div class=\"list-sub\">{}</div></div><span class=\"{}\">{}</span></li>",
                escape_html(&item.title),
                escape_html(&item.sub),
                item.badge.class_attr(),
                escape_html(&item.badge.label)
            );
        }
        html.push_str("</ul></section></main>");

        for modal in self.modals.values().filter(|modal| modal.visible) {
            modal.render_html(&mut html);
        }

        for _ in 0..self.overlays {
            html.push_str("<div class=\"loading-overlay\"><div class=\"loading-spinner\"><div class=\"spinner\"></div><p>Loading...</p></div></div>");
        }
        for toast in &self.toasts {
            let _ = write!(
                html,
                "<div class=\"{}\">{}</div>",
                toast.kind.class(),
                escape_html(&toast.message)
            );
        }
        html
    }
}
