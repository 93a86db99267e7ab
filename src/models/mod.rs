pub mod category;
pub mod city;
pub mod djinni_vacancy;
pub mod vacancy_link;
pub mod work_ua_vacancy;
