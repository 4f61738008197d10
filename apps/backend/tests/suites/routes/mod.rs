mod error_shape;
mod health;
mod protection;
