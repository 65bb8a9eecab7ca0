mod fakes;
mod payment_world;

pub use payment_world::PaymentWorld;
