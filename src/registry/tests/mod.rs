mod registration_tests;
mod synchronizer_tests;
