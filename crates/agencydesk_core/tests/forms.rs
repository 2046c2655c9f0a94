use agencydesk_core::{
    AgentGroup, Client, ClientForm, ClientStatus, EntityKind, EntityStore, FormError, FormModal,
    GroupForm, ModalMode, StoreError,
};

#[test]
fn create_submit_adds_record_and_closes() {
    let mut store = EntityStore::<Client>::new();
    let mut modal = FormModal::<ClientForm>::new();
    modal.open_create();
    modal.form.name = " Ada ".to_string();
    modal.form.company = "Acme Corp".to_string();
    modal.form.email = "not-an-email".to_string();
    modal.form.status = ClientStatus::Negotiation;

    let created = modal.submit(&mut store).unwrap();
    assert_eq!(created.name, "Ada");
    assert_eq!(created.email, "not-an-email");
    assert_eq!(created.status, ClientStatus::Negotiation);
    assert_eq!(store.len(), 1);
    assert!(!modal.is_open());
}

#[test]
fn missing_required_fields_keep_modal_open() {
    let mut store = EntityStore::<Client>::new();
    let mut modal = FormModal::<ClientForm>::new();
    modal.open_create();
    modal.form.company = "Acme Corp".to_string();

    let err = modal.submit(&mut store).unwrap_err();
    assert_eq!(err, FormError::MissingFields(vec!["name", "email"]));
    assert_eq!(err.to_string(), "missing required fields: name, email");
    assert!(modal.is_open());
    assert_eq!(modal.form.company, "Acme Corp");
    assert!(store.is_empty());
}

#[test]
fn edit_submit_updates_existing_record() {
    let mut store = EntityStore::<Client>::new();
    let mut modal = FormModal::<ClientForm>::new();
    modal.open_create();
    modal.form.name = "Ada".to_string();
    modal.form.company = "Acme Corp".to_string();
    modal.form.email = "ada@acme.test".to_string();
    let created = modal.submit(&mut store).unwrap();

    modal.open_edit(&created);
    assert_eq!(modal.mode(), ModalMode::Edit(created.id));
    assert_eq!(modal.form.company, "Acme Corp");
    modal.form.phone = "+1 555 0100".to_string();

    let updated = modal.submit(&mut store).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(store.len(), 1);
}

#[test]
fn edit_of_removed_record_reports_not_found() {
    let mut store = EntityStore::<AgentGroup>::new();
    let mut modal = FormModal::<GroupForm>::new();
    modal.open_create();
    modal.form.name = "Studio".to_string();
    let group = modal.submit(&mut store).unwrap();

    modal.open_edit(&group);
    store.remove(group.id).unwrap();
    let err = modal.submit(&mut store).unwrap_err();
    assert_eq!(
        err,
        FormError::Store(StoreError::NotFound {
            kind: EntityKind::AgentGroup,
            id: group.id,
        })
    );
    assert!(modal.is_open());
    assert!(store.is_empty());
}
