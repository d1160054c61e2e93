//! Unit tests for the board state model.
