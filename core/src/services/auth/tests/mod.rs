mod gate_tests;
