use helpers::FakeApi;
use prestigia_contact::{Affordance, ContactSection, Submission};

mod helpers;

#[tokio::test]
async fn test_affordances_navigate_without_request() -> anyhow::Result<()> {
    let api = FakeApi::replying([]);
    let section = ContactSection::new(api.clone());

    assert_eq!(
        section.activate(Affordance::Email).uri,
        "mailto:contact@prestigia-agency.com?subject=Demande%20d'information%20-%20Prestigia%20Agency"
    );
    assert_eq!(
        section.activate(Affordance::Call).uri,
        "https://wa.me/212652768993?text=Bonjour%20Je%20veux%20plus%20d'informations"
    );
    assert_eq!(
        section.activate(Affordance::Location).uri,
        "https://maps.google.com/?q=Bld+Qods+The+Gold+Center+Casablanca+Ain+Chock"
    );

    assert!(api.sent().is_empty());
    assert_eq!(section.view().submission, Submission::Idle);

    Ok(())
}
