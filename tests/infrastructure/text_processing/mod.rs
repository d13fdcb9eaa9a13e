mod sliding_window_splitter_test;
