pub mod add_book_cmd;
pub mod add_member_cmd;
pub mod issue_book_cmd;
pub mod return_book_cmd;
