use rust_decimal::Decimal;
use voice_grocer::catalog::{CatalogEntry, CatalogProvider, StaticCatalog};
use voice_grocer::config::ResolverConfig;
use voice_grocer::intent::rules::UNKNOWN_RESPONSE;
use voice_grocer::intent::{classify, Action, CommandClassifier};

fn demo() -> Vec<CatalogEntry> {
    StaticCatalog::demo().get_all()
}

fn entry(id: u32, name: &str, category: &str) -> CatalogEntry {
    CatalogEntry::new(id, name, Decimal::new(299, 2), category, "Crisp and sweet.")
}

#[test]
fn test_add_binds_every_product_with_quantity() {
    let catalog = demo();

    for product in &catalog {
        for n in 1..=20u32 {
            let command = format!("add {} {}", n, product.name);
            let intent = classify(&command, &catalog);

            assert_eq!(intent.action, Action::Add, "{}", command);
            assert_eq!(intent.product().map(|p| p.id), Some(product.id), "{}", command);
            assert_eq!(intent.parameters.quantity, Some(n), "{}", command);
        }
    }
}

#[test]
fn test_add_response_and_normalized_command() {
    let intent = classify("  ADD 2 Pasta ", &demo());

    assert_eq!(intent.raw_command, "add 2 pasta");
    assert_eq!(intent.action, Action::Add);
    assert_eq!(intent.spoken_response, "Added 2 Pasta to your cart.");
}

#[test]
fn test_remove_binds_singular_and_plural_names() {
    for stored in ["Apple", "Apples"] {
        let catalog = vec![entry(2, "Bananas", "fruits"), entry(1, stored, "fruits")];
        let intent = classify("remove apples", &catalog);

        assert_eq!(intent.action, Action::Remove, "stored as {}", stored);
        assert_eq!(intent.product().map(|p| p.id), Some(1), "stored as {}", stored);
        assert_eq!(intent.parameters.quantity, None, "no number spoken");
    }
}

#[test]
fn test_remove_from_cart_is_not_a_cart_command() {
    let intent = classify("remove bananas from my cart", &demo());

    assert_eq!(intent.action, Action::Remove);
    assert_eq!(intent.product().map(|p| p.id), Some(5));
    assert_eq!(intent.spoken_response, "Removed Ripe Bananas from your cart.");
}

#[test]
fn test_remove_with_number_keeps_quantity() {
    let intent = classify("remove 2 carrots", &demo());

    assert_eq!(intent.action, Action::Remove);
    assert_eq!(intent.product().map(|p| p.id), Some(15));
    assert_eq!(intent.parameters.quantity, Some(2));
}

#[test]
fn test_fuzzy_match_within_tolerance() {
    let intent = classify("add carots", &demo());

    assert_eq!(intent.action, Action::Add);
    assert_eq!(intent.product().map(|p| p.name.as_str()), Some("Carrots"));
}

#[test]
fn test_fuzzy_never_binds_beyond_ceiling() {
    let catalog = demo();

    let add = classify("add qqqqzzzz", &catalog);
    assert_eq!(add.action, Action::Unknown);
    assert_eq!(add.spoken_response, UNKNOWN_RESPONSE);
    assert!(add.product().is_none());

    let remove = classify("remove qqqqzzzz", &catalog);
    assert_eq!(remove.action, Action::Unknown);

    let describe = classify("describe qqqqzzzz", &catalog);
    assert_eq!(describe.action, Action::Unknown);
    assert!(describe.spoken_response.contains("couldn't find"));
}

#[test]
fn test_fuzzy_binds_short_name_within_ceiling() {
    let catalog = vec![entry(1, "Milk", "dairy")];

    let intent = classify("add mxxkq", &catalog);
    assert_eq!(intent.action, Action::Add);
    assert_eq!(intent.product().map(|p| p.id), Some(1));
}

#[test]
fn test_zero_ceiling_disables_fuzzy() {
    let classifier = CommandClassifier::new(ResolverConfig { fuzzy_ceiling: 0 });
    let intent = classifier.classify("add carots", &demo());

    assert_eq!(intent.action, Action::Unknown);
}

#[test]
fn test_add_demonstrative_without_product() {
    let intent = classify("add this", &demo());

    assert_eq!(intent.action, Action::Add);
    assert!(intent.product().is_none());
    assert_eq!(
        intent.spoken_response,
        "Please select a specific product to add to your cart."
    );
}

#[test]
fn test_contrast_polarity() {
    let catalog = demo();

    let off = classify("toggle contrast off", &catalog);
    assert_eq!(off.action, Action::Contrast);
    assert_eq!(off.parameters.contrast_mode, Some(false));
    assert_eq!(off.spoken_response, "High contrast mode disabled.");

    let on = classify("toggle contrast", &catalog);
    assert_eq!(on.parameters.contrast_mode, Some(true));

    let mode = classify("turn on high contrast mode", &catalog);
    assert_eq!(mode.parameters.contrast_mode, Some(true));
}

#[test]
fn test_search_for_category() {
    let intent = classify("search for dairy", &demo());

    assert_eq!(intent.action, Action::Search);
    assert_eq!(intent.parameters.query.as_deref(), Some("dairy"));
    assert_eq!(intent.parameters.category.as_deref(), Some("dairy"));
    assert_eq!(intent.spoken_response, "I found 4 products matching \"dairy\".");
}

#[test]
fn test_search_without_hits() {
    let intent = classify("find caviar", &demo());

    assert_eq!(intent.action, Action::Search);
    assert_eq!(intent.parameters.category, None);
    assert!(intent.spoken_response.starts_with("Sorry, I couldn't find"));
}

#[test]
fn test_browse_category_and_wildcard() {
    let catalog = demo();

    let dairy = classify("show me dairy products", &catalog);
    assert_eq!(dairy.action, Action::Search);
    assert_eq!(dairy.parameters.category.as_deref(), Some("dairy"));
    assert_eq!(dairy.spoken_response, "Showing dairy products.");

    let all = classify("show me everything", &catalog);
    assert_eq!(all.parameters.category.as_deref(), Some("all"));
    assert_eq!(all.spoken_response, "Showing all products.");
}

#[test]
fn test_describe_reports_description_and_price() {
    let catalog = vec![entry(1, "Apples", "fruits")];
    let intent = classify("describe apple", &catalog);

    assert_eq!(intent.action, Action::Describe);
    assert_eq!(intent.product().map(|p| p.id), Some(1));
    assert!(intent.spoken_response.contains("Crisp and sweet."));
    assert!(intent.spoken_response.contains("$2.99"));
}

#[test]
fn test_priority_order() {
    let catalog = demo();

    assert_eq!(classify("emergency", &catalog).action, Action::Emergency);
    assert_eq!(classify("help me now", &catalog).action, Action::Emergency);
    assert_eq!(classify("go to cart", &catalog).action, Action::Cart);
    assert_eq!(classify("checkout", &catalog).action, Action::Checkout);
    assert_eq!(classify("i want to pay", &catalog).action, Action::Checkout);
    assert_eq!(classify("help", &catalog).action, Action::Help);
    assert_eq!(classify("sing me a song", &catalog).action, Action::Unknown);
}

#[test]
fn test_checkout_matches_word_stems() {
    let catalog = demo();

    for command in ["check out now", "i'm buying these", "ready for payment", "finish purchasing"] {
        assert_eq!(classify(command, &catalog).action, Action::Checkout, "{}", command);
    }
}

#[test]
fn test_oversized_quantity_is_capped() {
    let intent = classify("add 99999999999 milk", &demo());

    assert_eq!(intent.action, Action::Add);
    assert_eq!(intent.parameters.quantity, Some(u32::MAX));
    assert!(intent.product().is_some());
}

#[test]
fn test_classification_is_pure() {
    let catalog = demo();
    let first = classify("add 3 avocados", &catalog);
    let second = classify("add 3 avocados", &catalog);

    assert_eq!(first, second);
    assert_eq!(catalog, demo(), "catalog untouched");
}
