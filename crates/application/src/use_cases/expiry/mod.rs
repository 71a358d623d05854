mod handle_expiry;

pub use handle_expiry::HandleExpiryUseCase;
