#![allow(dead_code)]

pub mod ad_service_stub;
