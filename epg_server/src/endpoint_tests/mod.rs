mod callback;
mod checkout;
mod helpers;
mod mocks;
mod products;
