//! Range ladder tests: step generation, first funding and user step deposits
