mod verification_kind_tests;
