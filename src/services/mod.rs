pub mod djinni_service;
pub mod fetcher;
pub mod geocode_service;
pub mod work_ua_service;
