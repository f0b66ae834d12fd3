mod raster_source_tests;
