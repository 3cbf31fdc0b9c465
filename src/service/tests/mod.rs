mod flat_map_tests;
