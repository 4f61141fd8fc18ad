//! Scripted end-to-end shopping flow.
//!
//! Browses the catalog, signs in against the simulated backend, fills a
//! cart, and checks out. Uses the configured simulation delay and payment
//! failure rate, so a card payment can be declined; the demo retries a
//! couple of times the way a shopper would.

use chap_storefront::checkout::{CardDetails, CheckoutDetails, CheckoutError, PaymentMethod};
use chap_storefront::models::user::Address;
use chap_storefront::search::{SearchFilters, SortKey};
use chap_storefront::{AppError, AppState};

/// Checkout attempts before the demo gives up on a declined card.
const MAX_PAYMENT_ATTEMPTS: u32 = 3;

/// Run the scripted flow.
///
/// # Errors
///
/// Returns an error if storage fails or every payment attempt is declined.
#[allow(clippy::print_stdout)]
pub async fn run(state: &mut AppState) -> Result<(), AppError> {
    println!("Signing in...");
    let signed_in = state.login("demo@chapcash.co.za", "demo").await?;
    if signed_in {
        if let Some(user) = state.auth().user() {
            println!("Welcome back, {} ({} loyalty points)", user.full_name(), user.loyalty_points);
        }
    } else {
        println!("Sign-in failed; continuing as a guest.");
    }

    println!("\nBest-rated products in stock:");
    let filters = SearchFilters {
        in_stock_only: true,
        sort: SortKey::Rating,
        ..SearchFilters::default()
    };
    let picks: Vec<_> = state
        .search(&filters)
        .into_iter()
        .take(3)
        .cloned()
        .collect();
    for product in &picks {
        println!("  {} - {} ({:.1}★)", product.name, product.price, product.rating);
    }

    for product in &picks {
        state.cart_mut().add_item(product);
    }
    let summary = state.cart().summary();
    println!("\nCart: {} item(s)", state.cart().item_count());
    println!("  Subtotal: {}", summary.subtotal);
    println!("  VAT:      {}", summary.vat);
    println!("  Shipping: {} (free)", summary.shipping);
    println!("  Total:    {}", summary.total);

    let details = CheckoutDetails {
        first_name: "Demo".to_owned(),
        last_name: "Shopper".to_owned(),
        email: "demo@chapcash.co.za".to_owned(),
        phone: "+27123456789".to_owned(),
        address: Address {
            street: "123 Main Street".to_owned(),
            city: "Johannesburg".to_owned(),
            province: "Gauteng".to_owned(),
            postal_code: "2000".to_owned(),
        },
    };
    let payment = PaymentMethod::Card(CardDetails {
        card_number: "4242 4242 4242 4242".to_owned(),
        expiry_date: "12/27".to_owned(),
        cvv: "123".to_owned(),
        cardholder_name: "Demo Shopper".to_owned(),
    });

    println!("\nPlacing order...");
    let mut attempt = 0;
    loop {
        attempt += 1;
        match state.checkout(&details, &payment).await {
            Ok(order) => {
                println!("Order {} placed for {}", order.order_id, order.total);
                println!("Earned {} loyalty points", order.loyalty_points());
                if let Some(user) = state.auth().user() {
                    println!("Balance: {} loyalty points", user.loyalty_points);
                }
                return Ok(());
            }
            Err(AppError::Checkout(CheckoutError::PaymentDeclined))
                if attempt < MAX_PAYMENT_ATTEMPTS =>
            {
                println!("Payment declined, retrying ({attempt}/{MAX_PAYMENT_ATTEMPTS})...");
            }
            Err(e) => return Err(e),
        }
    }
}
