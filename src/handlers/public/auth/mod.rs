// Token acquisition. The only way to obtain a token for the /api/games routes.

pub mod login;

pub use login::login_post;
