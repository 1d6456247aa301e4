// Initial dashboard layout: the regions, controls and modal forms of the page
use crate::domain::dashboard::Badge;
use crate::presentation::page::{Button, Fieldset, ListItem, ModalView, Page, StatCard, StatCardId};

pub const NEW_RECORD_MODAL: &str = "newRecordModal";
pub const ADD_RESIDENT_MODAL: &str = "addResidentModal";

pub const RECORD_TYPE_FIELD: &str = "recordType";
pub const RESIDENT_SELECT_FIELD: &str = "residentId";

pub const REFRESH_LABEL: &str = "↻ Refresh";

pub fn dashboard_page() -> Page {
    let mut page = Page::default();
    page.refresh_button = Button::new(REFRESH_LABEL);

    for id in StatCardId::ALL {
        let title = match id {
            StatCardId::Residents => "Total Residents",
            StatCardId::Households => "Households",
            StatCardId::Blotters => "Active Blotters",
            StatCardId::Clearances => "Clearances Issued (30 days)",
        };
        page.stat_cards.insert(
            id,
            StatCard {
                title: title.to_string(),
                value: "0".to_string(),
                sub: (id != StatCardId::Clearances).then(String::new),
            },
        );
    }

    page.clearance_summary = vec![
        ListItem {
            title: "Barangay Clearance".to_string(),
            sub: String::new(),
            badge: Badge::new("Pending", "info"),
        },
        ListItem {
            title: "Indigency Certificate".to_string(),
            sub: String::new(),
            badge: Badge::new("On track", "success"),
        },
    ];

    page.add_modal(new_record_modal());
    page.add_modal(add_resident_modal());
    page
}

fn new_record_modal() -> ModalView {
    ModalView::new(NEW_RECORD_MODAL, "Create Record")
        .with_fields(&[RECORD_TYPE_FIELD])
        .with_file_input("profilePicture")
        .with_fieldset(Fieldset::new(
            "residentFields",
            &[
                "firstName",
                "middleName",
                "lastName",
                "alias",
                "placeOfBirth",
                "birthDate",
                "civilStatus",
                "purok",
                "votersStatus",
                "identifiedAs",
                "email",
                "occupation",
                "citizenship",
                "sex",
                "address",
                "contactNumber",
            ],
        ))
        .with_fieldset(Fieldset::new(
            "householdFields",
            &["headName", "address", "purok", "contactNumber"],
        ))
        .with_fieldset(Fieldset::new(
            "blotterFields",
            &["caseTitle", "caseType", "details", "location", "respondentName"],
        ))
        .with_fieldset(Fieldset::new(
            "clearanceFields",
            &[RESIDENT_SELECT_FIELD, "clearanceType", "purpose"],
        ))
}

fn add_resident_modal() -> ModalView {
    ModalView::new(ADD_RESIDENT_MODAL, "Save Resident")
        .with_fields(&[
            "firstName",
            "middleName",
            "lastName",
            "birthDate",
            "sex",
            "civilStatus",
            "address",
            "contactNumber",
        ])
        .with_file_input("profileImage")
}
