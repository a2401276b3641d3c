mod password_reset_tests;
