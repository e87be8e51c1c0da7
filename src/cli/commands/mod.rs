mod delete;
mod exists;
mod init;
mod list;
mod login;
mod passwd;
mod register;
mod shell;

pub use delete::cmd_delete;
pub use exists::cmd_exists;
pub use init::cmd_init;
pub use list::cmd_list;
pub use login::{cmd_login, login_flow};
pub use passwd::cmd_passwd;
pub use register::cmd_register;
pub use shell::cmd_shell;

const FILL_ALL_FIELDS: &str = "Please fill in all fields";
const PASSWORDS_DIFFER: &str = "Passwords do not match!";
