use std::fmt::Write as _;

use divicuenta_domain::{DinerBill, PayerInfo};
use divicuenta_i18n as i18n;

use crate::currency::format_currency;

pub const EMAIL_SUBJECT: &str = i18n::EMAIL_SUBJECT;

const SEPARATOR: &str = "---------------------";

/// Per-diner bill text sent by email or WhatsApp.
pub struct BillMessage;

impl BillMessage {
    /// Email body.
    pub fn plain_text(bill: &DinerBill, payer: &PayerInfo) -> String {
        Self::render(bill, payer, false)
    }

    /// WhatsApp body: the total and the transfer labels are bold and the
    /// greeting waves.
    pub fn whatsapp(bill: &DinerBill, payer: &PayerInfo) -> String {
        Self::render(bill, payer, true)
    }

    fn render(bill: &DinerBill, payer: &PayerInfo, for_whatsapp: bool) -> String {
        let bold = if for_whatsapp { "*" } else { "" };
        let mut out = String::new();

        let _ = write!(
            out,
            "{}\n\n{}\n",
            i18n::greeting(bill.diner.first_name(), for_whatsapp),
            i18n::YOUR_ITEMS
        );
        let lines: Vec<String> = bill
            .lines
            .iter()
            .map(|line| {
                let shared = if line.is_shared() {
                    format!(" {}", i18n::shared_between(line.shared_with))
                } else {
                    String::new()
                };
                format!(
                    "- {}{shared}: {}",
                    line.item_name,
                    format_currency(line.display_amount())
                )
            })
            .collect();
        out.push_str(&lines.join("\n"));
        out.push('\n');

        let _ = writeln!(out, "{SEPARATOR}");
        let _ = writeln!(out, "{}: {}", i18n::SUBTOTAL, format_currency(bill.subtotal));
        let _ = writeln!(out, "{}: {}", i18n::TIP, format_currency(bill.tip));
        let _ = write!(
            out,
            "{bold}{}: {}{bold}\n\n",
            i18n::TOTAL_DUE,
            format_currency(bill.total)
        );

        let _ = writeln!(out, "{SEPARATOR}");
        let _ = writeln!(out, "{}", i18n::TRANSFER_DETAILS);
        for (label, value) in [
            (i18n::PAYER_NAME, &payer.name),
            (i18n::PAYER_RUT, &payer.rut),
            (i18n::PAYER_BANK, &payer.bank),
            (i18n::PAYER_ACCOUNT_TYPE, &payer.account_type),
        ] {
            let _ = writeln!(out, "{bold}{label}{bold} {value}");
        }
        let _ = write!(
            out,
            "{bold}{}{bold} {}\n\n{}",
            i18n::PAYER_ACCOUNT_NUMBER,
            payer.account_number,
            i18n::THANKS
        );
        out
    }
}

/// WhatsApp target for a Chilean mobile number: country code `56` followed
/// by the digits of `phone`.
pub fn whatsapp_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("56{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use divicuenta_domain::{Assignment, BillAllocator, Diner, DinerId, Item, ItemId, Money};
    use rstest::{fixture, rstest};

    fn payer() -> PayerInfo {
        PayerInfo {
            name: "Juan Perez (Invitado)".to_string(),
            rut: "12.345.678-9".to_string(),
            bank: "Banco Estado".to_string(),
            account_type: "Cuenta Corriente".to_string(),
            account_number: "1234567890".to_string(),
        }
    }

    #[fixture]
    fn ana_bill() -> DinerBill {
        let diners = [
            Diner {
                id: DinerId::from("diner-a"),
                name: "Ana María Soto".to_string(),
                email: Some("ana@mail.cl".to_string()),
                phone: None,
            },
            Diner {
                id: DinerId::from("diner-b"),
                name: "Beto".to_string(),
                email: None,
                phone: Some("9 1234 5678".to_string()),
            },
        ];
        let items = [
            Item {
                id: ItemId::from("pizza"),
                name: "Pizza".to_string(),
                price: Money::from_i64(10_000),
            },
            Item {
                id: ItemId::from("soda"),
                name: "Soda".to_string(),
                price: Money::from_i64(2_000),
            },
        ];
        let mut assignment = Assignment::new();
        assignment.toggle(&items[0].id, &diners[0].id);
        assignment.toggle(&items[0].id, &diners[1].id);
        assignment.toggle(&items[1].id, &diners[0].id);

        BillAllocator::default().bill_for_diner(&diners[0], &items, &assignment)
    }

    #[rstest]
    fn plain_text_matches_template(ana_bill: DinerBill) {
        let expected = "Hola Ana!  Tu parte de la cuenta es:\n\n\
            TUS PRODUCTOS\n\
            - Pizza (dividido entre 2): $5.000\n\
            - Soda: $2.000\n\
            ---------------------\n\
            Subtotal: $7.000\n\
            Propina (10%): $700\n\
            TOTAL A PAGAR: $7.700\n\n\
            ---------------------\n\
            DATOS PARA TRANSFERIR\n\
            Nombre: Juan Perez (Invitado)\n\
            RUT: 12.345.678-9\n\
            Banco: Banco Estado\n\
            Tipo de Cuenta: Cuenta Corriente\n\
            N° Cuenta: 1234567890\n\n\
            ¡Gracias!";

        assert_eq!(BillMessage::plain_text(&ana_bill, &payer()), expected);
    }

    #[rstest]
    fn whatsapp_bolds_total_and_labels(ana_bill: DinerBill) {
        let message = BillMessage::whatsapp(&ana_bill, &payer());

        assert!(message.starts_with("Hola Ana! 👋 Tu parte de la cuenta es:\n\n"));
        assert!(message.contains("\n*TOTAL A PAGAR: $7.700*\n\n"));
        assert!(message.contains("\n*Nombre:* Juan Perez (Invitado)\n"));
        assert!(message.contains("\n*N° Cuenta:* 1234567890\n\n¡Gracias!"));
        assert!(message.contains("- Soda: $2.000\n"));
    }

    #[test]
    fn line_amounts_are_rounded_up_individually() {
        let diners: Vec<Diner> = ["a", "b", "c"]
            .into_iter()
            .map(|id| Diner {
                id: DinerId::from(id),
                name: id.to_uppercase(),
                email: None,
                phone: Some("9".to_string()),
            })
            .collect();
        let items = [Item {
            id: ItemId::from("cake"),
            name: "Torta".to_string(),
            price: Money::from_i64(1_000),
        }];
        let mut assignment = Assignment::new();
        for diner in &diners {
            assignment.toggle(&items[0].id, &diner.id);
        }
        let bill = BillAllocator::default().bill_for_diner(&diners[0], &items, &assignment);

        let message = BillMessage::plain_text(&bill, &payer());

        assert!(message.contains("- Torta (dividido entre 3): $334\n"));
        assert!(message.contains("Subtotal: $334\nPropina (10%): $34\nTOTAL A PAGAR: $368\n"));
    }

    #[test]
    fn diner_without_items_gets_empty_list() {
        let diner = Diner {
            id: DinerId::from("solo"),
            name: "Caro".to_string(),
            email: None,
            phone: Some("9".to_string()),
        };
        let bill = BillAllocator::default().bill_for_diner(&diner, &[], &Assignment::new());

        let message = BillMessage::plain_text(&bill, &payer());

        assert!(message.contains("TUS PRODUCTOS\n\n---------------------\nSubtotal: $0\n"));
    }

    #[rstest]
    #[case::spaced("9 1234 5678", "56912345678")]
    #[case::prefixed("+56 9 1234-5678", "5656912345678")]
    #[case::empty("", "56")]
    fn whatsapp_number_prepends_country_code(#[case] phone: &str, #[case] expected: &str) {
        assert_eq!(whatsapp_number(phone), expected);
    }
}
