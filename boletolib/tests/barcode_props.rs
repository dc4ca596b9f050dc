use boletolib::{
    barcode::{BarcodePayload, VARIABLE_SEGMENT},
    checksum::BARCODE_MOD11,
    line::TypeableLine,
    model::{SlipCodes, SlipRecord, CURRENCY_BRL},
    registry::BankRegistry,
};
use proptest::prelude::*;

fn caixa_slip() -> impl Strategy<Value = SlipRecord> {
    (
        prop_oneof![Just("14"), Just("24")],
        "[0-9]{1,6}",
        prop::option::of("[0-9]"),
        "[0-9]{1,15}",
        0u32..=9999,
        0u64..=9_999_999_999,
    )
        .prop_map(|(wallet, account, account_digit, our_number, due_factor, amount_cents)| {
            SlipRecord {
                bank: "104".into(),
                wallet: wallet.into(),
                agency: "00281".into(),
                agency_digit: None,
                account,
                account_digit,
                our_number,
                our_number_digit: None,
                due_factor,
                amount_cents,
                currency: CURRENCY_BRL,
            }
        })
}

/// Цифры линии без DV блоков 1-3, переставленные в порядок кода de barras.
fn line_to_barcode_order(line: &TypeableLine) -> String {
    let stripped: String = line
        .digits()
        .char_indices()
        .filter(|(i, _)| ![9, 20, 31].contains(i))
        .map(|(_, c)| c)
        .collect();
    // stripped: банк+валюта(4) campo livre(25) DV(1) фактор+сумма(14)
    format!(
        "{}{}{}{}",
        &stripped[0..4],
        &stripped[29..30],
        &stripped[30..44],
        &stripped[4..29]
    )
}

proptest! {
    #[test]
    fn payload_is_44_digits_with_valid_check(slip in caixa_slip()) {
        let codes = BankRegistry::with_builtin_banks().generate(&slip).unwrap();
        let payload = codes.barcode;
        prop_assert_eq!(payload.as_str().len(), 44);
        prop_assert!(payload.as_str().bytes().all(|b| b.is_ascii_digit()));
        prop_assert_eq!(
            BARCODE_MOD11.check_digit(&payload.digits_without_check()).unwrap(),
            payload.check_digit()
        );
        prop_assert_eq!(payload.as_str().parse::<BarcodePayload>().unwrap(), payload);
        prop_assert_eq!(payload.amount_cents(), slip.amount_cents);
        prop_assert_eq!(payload.due_factor(), slip.due_factor);
    }

    #[test]
    fn line_round_trips_and_is_idempotent(slip in caixa_slip()) {
        let registry = BankRegistry::with_builtin_banks();
        let SlipCodes { barcode, line } = registry.generate(&slip).unwrap();

        prop_assert_eq!(line.digits().len(), 47);
        prop_assert_eq!(line_to_barcode_order(&line), barcode.as_str());
        prop_assert_eq!(line.to_payload().unwrap(), barcode);
        prop_assert_eq!(&line.block(0)[4..9], &barcode.as_str()[VARIABLE_SEGMENT][..5]);

        let again = TypeableLine::from_payload(&barcode).unwrap();
        prop_assert_eq!(again.to_string(), line.to_string());
        prop_assert_eq!(line.to_string().parse::<TypeableLine>().unwrap(), line);
    }
}

#[test]
fn codes_serialize_as_strings() {
    let slip = SlipRecord {
        bank: "104".into(),
        wallet: "14".into(),
        agency: "00281".into(),
        agency_digit: Some("0".into()),
        account: "721692".into(),
        account_digit: Some("0".into()),
        our_number: "000082107220355".into(),
        our_number_digit: None,
        due_factor: 8293,
        amount_cents: 214_260,
        currency: CURRENCY_BRL,
    };
    let codes = BankRegistry::with_builtin_banks().generate(&slip).expect("generate");
    let json = serde_json::to_string(&codes).expect("to json");
    assert_eq!(
        json,
        r#"{"barcode":"10499829300002142607216920000108241072203550","line":"10497.21697 20000.108249 10722.035507 9 82930000214260"}"#
    );
    let back: SlipCodes = serde_json::from_str(&json).expect("from json");
    assert_eq!(back, codes);

    let tampered = json.replace("10499829", "10469829");
    assert!(serde_json::from_str::<SlipCodes>(&tampered).is_err());

    let slip_json = serde_json::to_string(&slip).expect("slip to json");
    let slip_back: SlipRecord = serde_json::from_str(&slip_json).expect("slip from json");
    assert_eq!(slip_back, slip);
}
