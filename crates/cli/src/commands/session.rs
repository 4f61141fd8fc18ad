//! Persisted session commands.
//!
//! # Usage
//!
//! ```bash
//! chap session show
//! chap session clear
//! ```

use chap_storefront::{AppError, AppState};

/// Show the persisted session, if any.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState) {
    let Some(user) = state.auth().user() else {
        println!("No session.");
        return;
    };

    println!("{} <{}>", user.full_name(), user.email);
    println!("  Customer type:  {}", user.customer_type.as_str());
    println!("  Loyalty points: {}", user.loyalty_points);
    if let Some(phone) = &user.phone {
        println!("  Phone:          {phone}");
    }
    if let Some(address) = &user.address {
        println!(
            "  Address:        {}, {}, {} {}",
            address.street, address.city, address.province, address.postal_code
        );
    }
    if !user.wishlist.is_empty() {
        let ids: Vec<&str> = user.wishlist.iter().map(chap_core::ProductId::as_str).collect();
        println!("  Wishlist:       {}", ids.join(", "));
    }
    if !user.order_history.is_empty() {
        println!("  Orders placed:  {}", user.order_history.len());
    }
}

/// Sign out and remove the persisted session.
///
/// # Errors
///
/// Returns an error if the persisted session cannot be removed.
#[allow(clippy::print_stdout)]
pub fn clear(state: &mut AppState) -> Result<(), AppError> {
    if state.auth().is_authenticated() {
        state.auth_mut().logout()?;
        println!("Session cleared.");
    } else {
        println!("No session to clear.");
    }
    Ok(())
}
