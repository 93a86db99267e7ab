pub mod dates;
pub mod djinni;
pub mod html;
pub mod salary;
pub mod table;
pub mod text;
pub mod work_ua;
