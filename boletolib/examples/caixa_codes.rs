use boletolib::{
    amount::to_cents,
    due_date::DueDateCalendar,
    model::{SlipRecord, CURRENCY_BRL},
    registry,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: boleto Caixa, carteira 14, vencimento 2020-06-21, R$ 2.142,60
    let due = NaiveDate::from_ymd_opt(2020, 6, 21).ok_or("bad date")?;
    let slip = SlipRecord {
        bank: "104".into(),
        wallet: "14".into(),
        agency: "00281".into(),
        agency_digit: Some("0".into()),
        account: "721692".into(),
        account_digit: Some("0".into()),
        our_number: "000082107220355".into(),
        our_number_digit: None,
        due_factor: DueDateCalendar::default().factor(due)?,
        amount_cents: to_cents(Decimal::from_str_exact("2142.60")?)?,
        currency: CURRENCY_BRL,
    };
    let codes = registry::generate(&slip)?;
    println!("{}", codes.barcode);
    println!("{}", codes.line);
    Ok(())
}
