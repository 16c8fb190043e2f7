use rust_decimal::Decimal;

use crate::models::ticket::TicketType;

/// Price multiplier per tier: General x1, VIP x2, VVIP x3.5.
pub fn multiplier(ticket_type: TicketType) -> Decimal {
    match ticket_type {
        TicketType::General => Decimal::ONE,
        TicketType::Vip => Decimal::from(2),
        TicketType::Vvip => Decimal::new(35, 1),
    }
}

/// Single source of truth for per-ticket pricing. Both the cart (when a
/// line is added or merged) and checkout-time revalidation go through here.
pub fn ticket_price(base_price: Decimal, ticket_type: TicketType) -> Decimal {
    base_price * multiplier(ticket_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_charges_base_price() {
        let base = Decimal::new(8900, 2);
        assert_eq!(ticket_price(base, TicketType::General), base);
    }

    #[test]
    fn vip_doubles_base_price() {
        let base = Decimal::new(8900, 2);
        assert_eq!(
            ticket_price(base, TicketType::Vip),
            Decimal::new(17800, 2)
        );
    }

    #[test]
    fn vvip_is_three_and_a_half_times_base() {
        let base = Decimal::new(10000, 2);
        assert_eq!(
            ticket_price(base, TicketType::Vvip),
            Decimal::new(35000, 2)
        );
    }
}
