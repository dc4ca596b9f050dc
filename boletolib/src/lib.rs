//! boletolib — código de barras (44 цифры) и linha digitável (47 цифр)
//! банковских boletos по стандарту FEBRABAN.

pub mod amount;
pub mod barcode;
pub mod checksum;
pub mod digits;
pub mod due_date;
pub mod error;
pub mod line;
pub mod model;
pub mod registry;
pub mod traits;

pub mod banks {
    pub mod caixa;
    pub mod itau;
}
