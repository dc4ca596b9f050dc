//! Caixa Econômica Federal (104), leiaute SIGCB: código do beneficiário из 6 цифр.
//!
//! Campo livre (25):
//! conta(6) DV(1) NN[2..5] NN[0] NN[5..8] NN[1] NN[8..17] DV(1),
//! где NN = carteira(2) + nosso número(15).

use crate::{
    checksum::{ChecksumSpec, MOD11},
    digits::{pad, FieldWriter},
    error::Result,
    model::{SlipRecord, VariableSegment},
    traits::BankStrategy,
};

/// DV campo livre: 0, 10, 11 -> 0.
pub const CAIXA_MOD11: ChecksumSpec = MOD11.with_exceptions(&[(0, 0), (10, 0), (11, 0)]);

#[derive(Debug, Clone, Copy, Default)]
pub struct Caixa;

impl Caixa {
    pub const CODE: &'static str = "104";

    // TODO: código do beneficiário из 7 цифр (leiaute SICOB) не поддержан.
    const ACCOUNT_WIDTH: usize = 6;

    /// Carteira(2) + nosso número(15).
    fn composite_our_number(slip: &SlipRecord) -> Result<String> {
        let mut nn = pad("wallet", &slip.wallet, 2)?;
        nn.push_str(&pad("our_number", &slip.our_number, 15)?);
        Ok(nn)
    }
}

impl BankStrategy for Caixa {
    fn code(&self) -> &'static str {
        Self::CODE
    }

    fn code_digit(&self) -> char {
        '0'
    }

    fn name(&self) -> &'static str {
        "Caixa Econômica Federal S/A"
    }

    /// 14 — com registro, 24 — sem registro.
    fn wallets(&self) -> &'static [&'static str] {
        &["14", "24"]
    }

    fn wallet_label(&self, wallet: &str) -> Option<&'static str> {
        match wallet {
            "1" | "14" => Some("RG"),
            "2" | "24" => Some("SR"),
            _ => None,
        }
    }

    fn pack_variable_segment(&self, slip: &SlipRecord) -> Result<VariableSegment> {
        self.ensure_wallet(&slip.wallet)?;
        let nn = Self::composite_our_number(slip)?;

        let mut w = FieldWriter::<{ VariableSegment::LEN }>::new();
        w.push_padded("account", &slip.account, Self::ACCOUNT_WIDTH)?
            .push_padded(
                "account_digit",
                slip.account_digit.as_deref().unwrap_or_default(),
                1,
            )?
            // порядок кусков NN задан банком
            .push("our_number", &nn[2..5])?
            .push("our_number", &nn[0..1])?
            .push("our_number", &nn[5..8])?
            .push("our_number", &nn[1..2])?
            .push("our_number", &nn[8..])?;

        let dv = CAIXA_MOD11.check_digit(w.written())?;
        w.push_digit(dv)?;

        let segment = VariableSegment::new(w.finish()?)?;
        tracing::trace!(bank = Self::CODE, %segment, "campo livre packed");
        Ok(segment)
    }

    fn our_number_label(&self, slip: &SlipRecord) -> Result<String> {
        self.ensure_wallet(&slip.wallet)?;
        let nn = Self::composite_our_number(slip)?;
        Ok(match slip.our_number_digit.as_deref() {
            Some(d) if !d.is_empty() => format!("{nn}-{d}"),
            _ => nn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::BoletoError, model::CURRENCY_BRL};

    fn slip(wallet: &str, account: &str) -> SlipRecord {
        SlipRecord {
            bank: Caixa::CODE.into(),
            wallet: wallet.into(),
            agency: "00281".into(),
            agency_digit: Some("0".into()),
            account: account.into(),
            account_digit: Some("0".into()),
            our_number: "000082107220355".into(),
            our_number_digit: Some("6".into()),
            due_factor: 8293,
            amount_cents: 214_260,
            currency: CURRENCY_BRL,
        }
    }

    #[test]
    fn packs_registered_wallet() {
        let seg = Caixa.pack_variable_segment(&slip("14", "721692")).unwrap();
        assert_eq!(seg.as_str(), "7216920000108241072203550");
    }

    #[test]
    fn missing_account_digit_is_zero() {
        let mut s = slip("24", "721692");
        s.account_digit = None;
        s.our_number = "123".into();
        let seg = Caixa.pack_variable_segment(&s).unwrap();
        assert_eq!(seg.as_str(), "7216920000200040000001233");
    }

    #[test]
    fn unknown_wallet_is_rejected_first() {
        // conta тоже слишком длинная, но carteira проверяется раньше
        let err = Caixa.pack_variable_segment(&slip("11", "12345678")).unwrap_err();
        assert_eq!(
            err,
            BoletoError::UnsupportedWalletCode {
                bank: "104",
                wallet: "11".into()
            }
        );
    }

    #[test]
    fn labels() {
        assert_eq!(Caixa.code_with_digit(), "104-0");
        assert_eq!(Caixa.wallet_label("24"), Some("SR"));
        assert_eq!(
            Caixa.our_number_label(&slip("14", "721692")).unwrap(),
            "14000082107220355-6"
        );
    }
}
