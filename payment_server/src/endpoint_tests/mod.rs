mod helpers;
mod payments;
mod production;
