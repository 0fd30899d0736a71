pub mod vnpay;

pub use vnpay::{
    build_payment_url, CheckoutOptions, CheckoutPayment, HashCase, PaymentRequest, VnpayService,
};
