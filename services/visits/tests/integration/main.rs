mod redeem_visit_test;
mod request_visit_test;
